//! Order entities.

pub mod model;
pub mod status;

pub use model::{ArchivedOrder, CreateOrder, Order, OrderItem};
pub use status::OrderStatus;
