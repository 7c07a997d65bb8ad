//! Wall-clock access as a formatted-string capability.
//!
//! The resolver needs three things from the system clock: today's date for
//! the solar calculation, the current UTC offset in `%z` form for automatic
//! offset mode, and a formatted stamp for `last_updated`. Abstracting them
//! behind [`Clock`] keeps the resolution policy deterministic under test.

use chrono::{Local, NaiveDate};

use crate::constants::{LAST_UPDATED_FORMAT, UTC_OFFSET_FORMAT};

/// Source of current date/time components.
pub trait Clock {
    /// Current local date.
    fn today(&self) -> NaiveDate;

    /// Current UTC offset as a `%z`-style string, e.g. "-0500".
    fn utc_offset(&self) -> String;

    /// Current local time formatted as `YYYY-MM-DDTHH:MM:SS`.
    fn timestamp(&self) -> String;
}

/// Production clock backed by [`chrono::Local`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn utc_offset(&self) -> String {
        Local::now().format(UTC_OFFSET_FORMAT).to_string()
    }

    fn timestamp(&self) -> String {
        Local::now().format(LAST_UPDATED_FORMAT).to_string()
    }
}
