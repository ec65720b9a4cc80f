//! Human-readable rendering of [`Datey`](crate::datey::Datey) values.
//!
//! Formatting requires a localization context to be supplied by the caller.
//! The context resolves message keys (English phrases with `{...}`
//! placeholders) to translated phrases, and formats calendar dates given a
//! CLDR-style pattern obtained through that same catalog. The engine does
//! not manage locale lifecycle; see [`Localization`].

use chrono::NaiveDate;

use crate::datey::{Date, DateRange, Datey};
use crate::error::{KindredError, Result};

// ------------- Localization -------------
/// The externally-installed locale context consumed by the formatter.
///
/// `message` looks up a phrase by key, returning the key itself when no
/// translation exists (gettext semantics). `format_date` renders a calendar
/// date according to a pattern string that has itself been run through the
/// message catalog, so each locale may substitute its own pattern.
pub trait Localization {
    fn message(&self, key: &str) -> String;
    fn format_date(&self, date: NaiveDate, pattern: &str) -> String;
    fn locale(&self) -> &str;
}

/// Pass-through catalog with chrono-backed date rendering. Doubles as the
/// reference for which patterns a catalog is expected to translate.
pub struct EnglishLocalization;

impl Localization for EnglishLocalization {
    fn message(&self, key: &str) -> String {
        key.to_owned()
    }
    fn format_date(&self, date: NaiveDate, pattern: &str) -> String {
        date.format(strftime_of(pattern)).to_string()
    }
    fn locale(&self) -> &str {
        "en-US"
    }
}

fn strftime_of(pattern: &str) -> &'static str {
    match pattern {
        "MMMM d, y" => "%B %-d, %Y",
        "MMMM, y" => "%B, %Y",
        "y" => "%Y",
        "MMMM d" => "%B %-d",
        "MMMM" => "%B",
        _ => "%Y-%m-%d",
    }
}

// ------------- Datey formatting -------------
/// Formats a datey value into a human-readable string.
///
/// A single date without enough parts renders as the localized
/// "unknown date" placeholder. A range where neither side renders is an
/// [`KindredError::IncompleteDate`] error, propagated to the caller.
pub fn format_datey(datey: &Datey, localization: &dyn Localization) -> Result<String> {
    match datey {
        Datey::Date(date) => Ok(format_date(date, localization)
            .unwrap_or_else(|_| localization.message("unknown date"))),
        Datey::Range(range) => format_date_range(range, localization),
    }
}

pub fn format_date(date: &Date, localization: &dyn Localization) -> Result<String> {
    let body = format_date_parts(date, localization)?;
    let key = if date.is_fuzzy() { "around {date}" } else { "{date}" };
    Ok(localization.message(key).replace("{date}", &body))
}

// Selects the pattern by the exact presence-pattern of (year, month, day).
fn format_date_parts(date: &Date, localization: &dyn Localization) -> Result<String> {
    let pattern = match (
        date.year().is_some(),
        date.month().is_some(),
        date.day().is_some(),
    ) {
        (true, true, true) => "MMMM d, y",
        (true, true, false) => "MMMM, y",
        (true, false, false) => "y",
        (false, true, true) => "MMMM d",
        (false, true, false) => "MMMM",
        _ => {
            return Err(KindredError::IncompleteDate(format!(
                "the date {} does not have enough parts to be rendered",
                date
            )))
        }
    };
    // absent parts default to 1 so the calendar formatter has a full date
    let calendar_date = NaiveDate::from_ymd_opt(
        date.year().unwrap_or(1),
        date.month().unwrap_or(1),
        date.day().unwrap_or(1),
    )
    .ok_or_else(|| {
        KindredError::IncompleteDate(format!("the date {} is not a calendar date", date))
    })?;
    Ok(localization.format_date(calendar_date, &localization.message(pattern)))
}

pub fn format_date_range(range: &DateRange, localization: &dyn Localization) -> Result<String> {
    // each side contributes (fuzzy, is_boundary) when it renders, None when
    // it does not; the pair selects one of the 24 phrase templates
    let start = range.start().and_then(|date| {
        format_date_parts(date, localization)
            .ok()
            .map(|body| (body, date.is_fuzzy(), range.start_is_boundary()))
    });
    let end = range.end().and_then(|date| {
        format_date_parts(date, localization)
            .ok()
            .map(|body| (body, date.is_fuzzy(), range.end_is_boundary()))
    });
    let start_key = start.as_ref().map(|(_, fuzzy, boundary)| (*fuzzy, *boundary));
    let end_key = end.as_ref().map(|(_, fuzzy, boundary)| (*fuzzy, *boundary));
    let key = match (start_key, end_key) {
        (Some((false, false)), Some((false, false))) => "from {start_date} until {end_date}",
        (Some((false, false)), Some((false, true))) => {
            "from {start_date} until sometime before {end_date}"
        }
        (Some((false, false)), Some((true, false))) => "from {start_date} until around {end_date}",
        (Some((false, false)), Some((true, true))) => {
            "from {start_date} until sometime before around {end_date}"
        }
        (Some((false, true)), Some((false, false))) => {
            "from sometime after {start_date} until {end_date}"
        }
        (Some((false, true)), Some((false, true))) => {
            "sometime between {start_date} and {end_date}"
        }
        (Some((false, true)), Some((true, false))) => {
            "from sometime after {start_date} until around {end_date}"
        }
        (Some((false, true)), Some((true, true))) => {
            "sometime between {start_date} and around {end_date}"
        }
        (Some((true, false)), Some((false, false))) => {
            "from around {start_date} until {end_date}"
        }
        (Some((true, false)), Some((false, true))) => {
            "from around {start_date} until sometime before {end_date}"
        }
        (Some((true, false)), Some((true, false))) => {
            "from around {start_date} until around {end_date}"
        }
        (Some((true, false)), Some((true, true))) => {
            "from around {start_date} until sometime before around {end_date}"
        }
        (Some((true, true)), Some((false, false))) => {
            "from sometime after around {start_date} until {end_date}"
        }
        (Some((true, true)), Some((false, true))) => {
            "sometime between around {start_date} and {end_date}"
        }
        (Some((true, true)), Some((true, false))) => {
            "from sometime after around {start_date} until around {end_date}"
        }
        (Some((true, true)), Some((true, true))) => {
            "sometime between around {start_date} and around {end_date}"
        }
        (Some((false, false)), None) => "from {start_date}",
        (Some((false, true)), None) => "sometime after {start_date}",
        (Some((true, false)), None) => "from around {start_date}",
        (Some((true, true)), None) => "sometime after around {start_date}",
        (None, Some((false, false))) => "until {end_date}",
        (None, Some((false, true))) => "sometime before {end_date}",
        (None, Some((true, false))) => "until around {end_date}",
        (None, Some((true, true))) => "sometime before around {end_date}",
        (None, None) => {
            return Err(KindredError::IncompleteDate(
                "neither side of this date range can be rendered".to_owned(),
            ))
        }
    };
    let mut phrase = localization.message(key);
    if let Some((body, _, _)) = &start {
        phrase = phrase.replace("{start_date}", body);
    }
    if let Some((body, _, _)) = &end {
        phrase = phrase.replace("{end_date}", body);
    }
    Ok(phrase)
}
