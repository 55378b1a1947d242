//! Veld runtime services.

pub mod notecard;
