//! Date arguments for batch runs.

use chrono::{Days, NaiveDate};

use crate::error::{Error, Result};

/// Parse a date argument relative to `today`.
///
/// Accepts `today`/`t`, `yesterday`/`y`, a day offset such as `-2` or `3`,
/// or an ISO 8601 date (`2020-12-25`).
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    let invalid = || Error::Config(format!("invalid date '{input}'"));

    match input {
        "t" | "today" => return Ok(today),
        "y" | "yesterday" => return today.checked_sub_days(Days::new(1)).ok_or_else(invalid),
        _ => {}
    }

    let digits = input.strip_prefix('-').unwrap_or(input);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let days = Days::new(digits.parse::<u64>().map_err(|_| invalid())?);
        let shifted = if input.starts_with('-') {
            today.checked_sub_days(days)
        } else {
            today.checked_add_days(days)
        };
        return shifted.ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

/// Inclusive range of days, oldest first.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    /// Days from `start` to `end` inclusive; empty when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|next| *next <= self.end);
        Some(current)
    }
}

/// Output file name for a source's puzzle on a date, e.g. `es-2020-12-25.pdf`.
pub fn output_filename(nick: &str, date: NaiveDate) -> String {
    format!("{nick}-{}.pdf", date.format("%Y-%m-%d"))
}
