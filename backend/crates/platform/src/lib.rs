//! Platform Crate - Technical Infrastructure
//!
//! Domain-agnostic building blocks used by the auth core:
//! - Password hashing (Argon2id, NIST SP 800-63B policy)
//! - HMAC-SHA256 signing, base64url, secure random bytes
//! - Cookie and `Authorization: Bearer` header handling
//! - Environment configuration helpers

pub mod bearer;
pub mod config;
pub mod cookie;
pub mod crypto;
pub mod password;
