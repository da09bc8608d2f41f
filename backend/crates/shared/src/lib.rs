//! Shared Kernel
//!
//! Error vocabulary shared by every backend crate:
//! - [`error::kind::ErrorKind`] maps failures onto HTTP status classes
//! - [`error::app_error::AppError`] is the client-facing error value
//! - sqlx error classification and an axum `IntoResponse` rendering as
//!   RFC 7807 problem JSON
//!
//! Only vocabulary whose meaning is identical across domains lives here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
