//! Table reservation entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::status::ReservationStatus;

/// A table reservation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReservation {
    /// Store-assigned identifier.
    pub id: String,
    /// Name given by the customer.
    pub customer_name: String,
    /// Contact phone, as typed by the customer.
    pub customer_phone: String,
    /// Party size.
    pub number_of_guests: u32,
    /// Requested date.
    pub reservation_date: NaiveDate,
    /// Requested arrival time.
    pub reservation_time: NaiveTime,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Current lifecycle status.
    pub status: ReservationStatus,
    /// When the request was received.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data required to book a reservation. New reservations start pending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReservation {
    /// Customer name.
    #[validate(length(min = 1, max = 120))]
    pub customer_name: String,
    /// Contact phone.
    #[validate(custom(function = "validate_phone"))]
    pub customer_phone: String,
    /// Party size.
    #[validate(range(min = 1, max = 100))]
    pub number_of_guests: u32,
    /// Requested date.
    pub reservation_date: NaiveDate,
    /// Requested arrival time.
    pub reservation_time: NaiveTime,
    /// Free-form notes.
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if (6..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_digits"))
    }
}
