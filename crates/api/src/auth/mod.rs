//! JWT token handling.

pub mod jwt;
