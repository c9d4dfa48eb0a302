//! Contact message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Whether staff has looked at a contact message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    /// Not yet opened.
    #[default]
    Unread,
    /// Opened by staff.
    Read,
}

impl ContactStatus {
    /// Human-readable label for operator views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unread => "Unread",
            Self::Read => "Read",
        }
    }
}

/// A message sent through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned identifier.
    pub id: String,
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Sender phone.
    #[serde(default)]
    pub phone: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Read state.
    #[serde(default)]
    pub status: ContactStatus,
    /// When the message arrived. Older imported records have none.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Data submitted through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContact {
    /// Sender name.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Sender email.
    #[validate(email)]
    pub email: String,
    /// Sender phone.
    #[validate(length(max = 32))]
    pub phone: String,
    /// Subject line.
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    /// Message body.
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}
