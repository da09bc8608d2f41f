//! Entity Module

pub mod account;
pub mod account_profile;
pub mod token;
