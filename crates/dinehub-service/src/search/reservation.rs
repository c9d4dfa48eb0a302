//! Text and status filtering over an already-fetched reservation list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dinehub_core::error::AppError;
use dinehub_entity::{ReservationStatus, TableReservation};

/// Status half of a reservation filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Any status.
    #[default]
    All,
    /// Exactly this status.
    Only(ReservationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ReservationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl From<ReservationStatus> for StatusFilter {
    fn from(status: ReservationStatus) -> Self {
        Self::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    /// `all` (or nothing) selects every status; anything else must name one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// A normalized free-text reservation query.
///
/// A reservation matches when the query is empty, when it occurs in the
/// customer name (case-insensitive, whitespace collapsed), or when the
/// query's digits occur in the phone number's digits. A query without
/// digits never matches on phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationSearch {
    text: String,
    digits: String,
}

impl ReservationSearch {
    pub fn new(query: &str) -> Self {
        Self {
            text: collapse_whitespace(&query.trim().to_lowercase()),
            digits: digits_of(query),
        }
    }

    /// True when the query matches everything.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn matches(&self, reservation: &TableReservation) -> bool {
        self.is_empty()
            || self.name_matches(&reservation.customer_name)
            || self.phone_matches(&reservation.customer_phone)
    }

    fn name_matches(&self, name: &str) -> bool {
        // Whitespace runs compare as one space on both sides, so "h t"
        // also finds "Anh\tTuấn".
        collapse_whitespace(&name.to_lowercase()).contains(&self.text)
    }

    fn phone_matches(&self, phone: &str) -> bool {
        !self.digits.is_empty() && digits_of(phone).contains(&self.digits)
    }
}

/// Keeps reservations matching both `query` and `status`, in input order.
pub fn filter_reservations<'a>(
    records: &'a [TableReservation],
    query: &str,
    status: StatusFilter,
) -> Vec<&'a TableReservation> {
    let search = ReservationSearch::new(query);
    records
        .iter()
        .filter(|r| status.matches(r.status) && search.matches(r))
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn digits_of(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}
