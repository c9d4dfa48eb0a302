//! Order status and its lifecycle transitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dinehub_core::error::AppError;

/// Status of a table order.
///
/// Orders move forward `pending -> confirmed -> preparing -> completed`
/// one step at a time and may be cancelled from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by the customer, not yet accepted by staff.
    Pending,
    /// Accepted by staff.
    Confirmed,
    /// Being prepared in the kitchen.
    Preparing,
    /// Served and settled.
    Completed,
    /// Cancelled before completion.
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The next forward step, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }

    /// Check whether moving to `target` is a legal transition.
    pub fn can_transition_to(&self, target: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == Self::Cancelled || self.next() == Some(target)
    }

    /// Validate a transition, returning `InvalidTransition` when illegal.
    pub fn ensure_transition(&self, target: Self) -> Result<(), AppError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(AppError::invalid_transition(format!(
                "Order cannot move from '{self}' to '{target}'"
            )))
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable label for operator views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Preparing => "Preparing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::validation(format!("Unknown order status '{other}'"))),
        }
    }
}
