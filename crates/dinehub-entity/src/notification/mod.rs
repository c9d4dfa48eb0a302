//! Operator notification feed entities.

pub mod kind;
pub mod model;

pub use kind::NotificationKind;
pub use model::NotificationItem;
