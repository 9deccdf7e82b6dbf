//! Parsing of the transaction form date.
//!
//! Clients send an ISO-8601 timestamp with milliseconds and a zone offset
//! (`2024-03-01T10:00:00.000Z`, `...000+01`, `...000+0100`, `...000+01:00`).
//! Only the calendar date as written is kept: the offset is not applied, so
//! `2024-03-01T23:30:00.000-05:00` is the 1st of March.

use chrono::{DateTime, NaiveDate};

use crate::{EngineError, ResultEngine};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%#z";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a form date into a calendar date.
///
/// A bare `yyyy-MM-dd` is accepted as well.
pub fn parse_form_date(raw: &str) -> ResultEngine<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MissingField("date".to_string()));
    }

    let normalized = match trimmed.strip_suffix(['Z', 'z']) {
        Some(stripped) => format!("{stripped}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(timestamp) = DateTime::parse_from_str(&normalized, TIMESTAMP_FORMAT) {
        return Ok(timestamp.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(format!("unsupported date format: {trimmed}")))
}
