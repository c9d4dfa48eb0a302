//! Table reservation entities.

pub mod model;
pub mod status;

pub use model::{CreateReservation, TableReservation};
pub use status::ReservationStatus;
