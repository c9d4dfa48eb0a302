//! Notification source enumeration.

use serde::{Deserialize, Serialize};

/// The collection a notification was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A table reservation.
    Reservation,
    /// A table order.
    Order,
    /// A contact form message.
    Contact,
    /// A customer review.
    Feedback,
}

impl NotificationKind {
    /// All sources, in merge order.
    pub const ALL: [Self; 4] = [Self::Reservation, Self::Order, Self::Contact, Self::Feedback];

    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reservation => "reservation",
            Self::Order => "order",
            Self::Contact => "contact",
            Self::Feedback => "feedback",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
