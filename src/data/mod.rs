//! Yearly energy records: parsing, validation and the read-only store.

/// Programmatic record construction.
pub mod dsl;
pub mod record;
pub mod store;
pub mod validate;
