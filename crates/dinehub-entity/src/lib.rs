//! # dinehub-entity
//!
//! Domain entity models for DineHub. Every struct in this crate represents
//! a document in one of the store collections or a derived value object.
//! All entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod cleanup;
pub mod contact;
pub mod feedback;
pub mod notification;
pub mod order;
pub mod report;
pub mod reservation;

pub use cleanup::CleanupResult;
pub use contact::{Contact, ContactStatus, CreateContact};
pub use feedback::{CreateFeedback, Feedback};
pub use notification::{NotificationItem, NotificationKind};
pub use order::{ArchivedOrder, CreateOrder, Order, OrderItem, OrderStatus};
pub use report::SalesReport;
pub use reservation::{CreateReservation, ReservationStatus, TableReservation};
