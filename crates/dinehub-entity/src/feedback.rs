//! Customer feedback entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Store-assigned identifier.
    pub id: String,
    /// Reviewer name.
    pub customer_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review text.
    #[serde(default)]
    pub comment: String,
    /// Hidden from the public page by staff.
    #[serde(default)]
    pub hidden: bool,
    /// When the review was posted. Older imported records have none.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Feedback {
    /// Visibility label for operator views.
    pub fn visibility_label(&self) -> &'static str {
        if self.hidden { "Hidden" } else { "Visible" }
    }
}

/// Data submitted through the review form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFeedback {
    /// Reviewer name.
    #[validate(length(min = 1, max = 120))]
    pub customer_name: String,
    /// Star rating.
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    /// Review text.
    #[validate(length(max = 2000))]
    pub comment: String,
}
