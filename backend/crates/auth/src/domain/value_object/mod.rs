//! Value Object Module

pub mod identity;
pub mod user_name;
pub mod user_password;
