//! Request extractors.

pub mod auth;

pub use auth::{AdminAuth, AuthUser};
