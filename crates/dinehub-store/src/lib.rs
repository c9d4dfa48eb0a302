//! # dinehub-store
//!
//! The record store adapter contract consumed by the DineHub core, plus
//! the adapters shipped with it:
//!
//! - [`MemoryStore`]: a single-node in-memory document store
//! - [`TimedStore`]: a decorator that puts a deadline on every call
//!
//! The store is pull-based. Push behaviour is layered on top through the
//! [`ChangeFeed`] subscription.

pub mod adapter;
pub mod events;
#[cfg(any(test, feature = "test-util"))]
pub mod fault;
pub mod memory;
pub mod timeout;

pub use adapter::{OrderQuery, RecordStore, ReservationQuery};
pub use events::{ChangeFeed, ChangeKind, Collection, StoreEvent};
pub use memory::MemoryStore;
pub use timeout::TimedStore;
