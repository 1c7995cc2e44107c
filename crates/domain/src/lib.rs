//! Domain layer for the Simitra backend.
//!
//! This crate contains:
//! - Domain models (Mitra, Kegiatan, roster aggregates, templates)
//! - Request/response DTOs with validation rules
//! - Pure business-logic services (import mapping, honor-cap evaluation)

pub mod models;
pub mod services;
