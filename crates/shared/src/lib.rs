//! Shared utilities and common types for the Simitra backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Bearer-token generation and hashing
//! - Password hashing with Argon2id
//! - Common validation logic (period strings, years, NIK)

pub mod crypto;
pub mod password;
pub mod validation;
