//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

use crate::format::Locale;

/// UTC timestamp used for the dashboard's `last_updated` label.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Format a timestamp the way the given locale writes dates and times.
#[must_use]
pub fn format_timestamp(ts: Timestamp, locale: Locale) -> String {
    match locale {
        Locale::PtBr => ts.format("%d/%m/%Y, %H:%M:%S UTC").to_string(),
        Locale::EnUs => ts.format("%m/%d/%Y, %-I:%M:%S %p UTC").to_string(),
    }
}
