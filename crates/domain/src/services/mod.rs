//! Pure business-logic services, independent of transport and storage.

pub mod honor;
pub mod import;
