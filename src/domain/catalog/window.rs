//! Validity window value object for price rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Half-open time interval `[start, end)` during which a price rule applies.
///
/// # Invariants
///
/// - `end` is strictly after `start`
/// - an instant equal to `start` is inside the window
/// - an instant equal to `end` is outside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ValidityWindow {
    /// Creates a window, rejecting inverted or empty ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::invalid_format(
                "end_date",
                "must be after start_date",
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start of the window.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end of the window.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Checks whether the instant falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}
