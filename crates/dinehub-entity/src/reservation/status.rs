//! Reservation status and its lifecycle transitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dinehub_core::error::AppError;

/// Status of a table reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Requested by the customer, awaiting staff.
    Pending,
    /// Accepted by staff.
    Confirmed,
    /// Declined or withdrawn.
    Cancelled,
}

impl ReservationStatus {
    /// All statuses.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    /// Check if the reservation is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }

    /// Only a pending reservation may change, and only to a terminal state.
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed) | (Self::Pending, Self::Cancelled)
        )
    }

    /// Validate a transition, returning `InvalidTransition` when illegal.
    pub fn ensure_transition(&self, target: Self) -> Result<(), AppError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(AppError::invalid_transition(format!(
                "Reservation cannot move from '{self}' to '{target}'"
            )))
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable label for operator views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::validation(format!(
                "Unknown reservation status '{other}'"
            ))),
        }
    }
}
