//! Retention and archival of aged orders.
//!
//! Cancelled orders are purged after a short grace period; completed orders
//! are copied to the archive collection and removed from the live one once
//! they pass the archival threshold.

pub mod engine;
pub mod error;
pub mod policy;

pub use engine::RetentionEngine;
pub use error::SweepError;
pub use policy::RetentionPolicy;
