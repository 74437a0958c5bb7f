//! Long-form date label for the page header.

use chrono::{Datelike, Local, NaiveDate};

/// e.g. "Friday, October 16, 2026".
pub fn long_date(date: NaiveDate) -> String {
    format!("{}, {} {}, {}", date.format("%A"), date.format("%B"), date.day(), date.year())
}

/// Today's label in the local time zone.
pub fn today_label() -> String {
    long_date(Local::now().date_naive())
}
