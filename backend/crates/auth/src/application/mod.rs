//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod credential_store;
pub mod session_gate;
pub mod sign_in;
pub mod sign_up;
pub mod token_service;

// Re-exports
pub use config::{AuthConfig, TokenSecret};
pub use credential_store::{CredentialCheck, CredentialStore};
pub use session_gate::SessionGate;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token_service::TokenService;
