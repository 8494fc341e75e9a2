//! Day normalization helpers.
//!
//! The tracker domain works in local calendar days. Any timestamp entering a
//! comparison, hash or map key must pass through [`day_of`] first, so that
//! time-of-day components can never split one logical day into two.

use chrono::{DateTime, Local, NaiveDate};

/// Truncate a timestamp to its local calendar day.
pub fn day_of(date: DateTime<Local>) -> NaiveDate {
    date.date_naive()
}

/// The current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether a timestamp falls on a day after today.
///
/// Used by callers to refuse completing trackers in the future.
pub fn is_future_date(date: DateTime<Local>) -> bool {
    day_of(date) > today()
}
