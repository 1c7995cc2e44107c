//! Persistence layer for the Simitra backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations with explicit SQL per query

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
