// chrono provides the calendar arithmetic (month lengths, leap years)
use chrono::{Datelike, NaiveDate};

// custom made ordering for dates and date ranges
use std::cmp::Ordering;

// used to print out readable forms of a datey
use std::fmt;

// used when parsing dateval literals
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{KindredError, Result};

// ------------- Date -------------
// A point in time of which only some parts may be known. A date without
// a year cannot take part in any ordering.
#[derive(Clone, Debug, Default)]
pub struct Date {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    fuzzy: bool,
}

impl Date {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn from_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }
    pub fn from_year_month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            ..Self::default()
        }
    }
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            fuzzy: false,
        }
    }
    pub fn from_parts(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        Self {
            year,
            month,
            day,
            fuzzy: false,
        }
    }
    // marks the date as approximate ("around"), which only affects formatting
    pub fn fuzzy(mut self) -> Self {
        self.fuzzy = true;
        self
    }
    pub fn year(&self) -> Option<i32> {
        self.year
    }
    pub fn month(&self) -> Option<u32> {
        self.month
    }
    pub fn day(&self) -> Option<u32> {
        self.day
    }
    pub fn is_fuzzy(&self) -> bool {
        self.fuzzy
    }
    pub fn parts(&self) -> (Option<i32>, Option<u32>, Option<u32>) {
        (self.year, self.month, self.day)
    }
    pub fn comparable(&self) -> bool {
        self.year.is_some()
    }
    pub fn complete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }
    /// Widens the date to the range it could fall within: a missing month
    /// spans January through December, a missing day the whole month.
    pub fn to_range(&self) -> Result<DateRange> {
        let year = self.year.ok_or_else(|| {
            KindredError::Invariant(format!("cannot widen the non-comparable date {} to a range", self))
        })?;
        let (month_start, month_end) = match self.month {
            Some(month) => (month, month),
            None => (1, 12),
        };
        let (day_start, day_end) = match self.day {
            Some(day) => (day, day),
            None => (1, days_in_month(year, month_end)),
        };
        Ok(DateRange::between(
            Date::from_ymd(year, month_start, day_start),
            Date::from_ymd(year, month_end, day_end),
        ))
    }
}

// equality disregards fuzziness, which is a display concern
impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.parts() == other.parts()
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.comparable() || !other.comparable() {
            return None;
        }
        if self.complete() && other.complete() {
            return Some(self.parts().cmp(&other.parts()));
        }
        // widen whichever side is incomplete and compare the covering ranges
        let selfish = self.to_range().ok()?;
        let other = other.to_range().ok()?;
        selfish.partial_cmp(&other)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.fuzzy {
            write!(f, "~")?;
        }
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.unwrap_or(0),
            self.month.unwrap_or(0),
            self.day.unwrap_or(0)
        )
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month >= 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|date| date.pred_opt())
        .map(|date| date.day())
        .unwrap_or(31)
}

// ------------- DateRange -------------
// A period with optional bounds. A bound marked as a boundary means the
// true date is only known to lie beyond it, not to coincide with it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DateRange {
    start: Option<Date>,
    start_is_boundary: bool,
    end: Option<Date>,
    end_is_boundary: bool,
}

impl DateRange {
    pub fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self {
            start,
            start_is_boundary: false,
            end,
            end_is_boundary: false,
        }
    }
    pub fn since(start: Date) -> Self {
        Self::new(Some(start), None)
    }
    pub fn until(end: Date) -> Self {
        Self::new(None, Some(end))
    }
    pub fn between(start: Date, end: Date) -> Self {
        Self::new(Some(start), Some(end))
    }
    // the true date lies after the start, it did not begin at it
    pub fn with_start_boundary(mut self) -> Self {
        self.start_is_boundary = true;
        self
    }
    // the true date lies before the end, it did not close at it
    pub fn with_end_boundary(mut self) -> Self {
        self.end_is_boundary = true;
        self
    }
    pub fn start(&self) -> Option<&Date> {
        self.start.as_ref()
    }
    pub fn end(&self) -> Option<&Date> {
        self.end.as_ref()
    }
    pub fn start_is_boundary(&self) -> bool {
        self.start_is_boundary
    }
    pub fn end_is_boundary(&self) -> bool {
        self.end_is_boundary
    }
    pub fn comparable(&self) -> bool {
        self.start.as_ref().is_some_and(|date| date.comparable())
            || self.end.as_ref().is_some_and(|date| date.comparable())
    }
    /// Does this range overlap the given date or range? Non-comparable
    /// operands never overlap anything.
    pub fn contains(&self, other: &Datey) -> bool {
        if !self.comparable() {
            return false;
        }
        let candidates: Vec<&Date> = match other {
            Datey::Date(date) => {
                if !date.comparable() {
                    return false;
                }
                vec![date]
            }
            Datey::Range(range) => {
                if !range.comparable() {
                    return false;
                }
                range
                    .start
                    .iter()
                    .chain(range.end.iter())
                    .filter(|date| date.comparable())
                    .collect()
            }
        };
        match (self.start.as_ref(), self.end.as_ref()) {
            (Some(start), Some(end)) => {
                if let Datey::Range(range) = other {
                    match (range.start.as_ref(), range.end.as_ref()) {
                        (None, Some(other_end)) => {
                            return date_le(start, other_end) || date_le(end, other_end);
                        }
                        (Some(other_start), None) => {
                            return date_ge(start, other_start) || date_ge(end, other_start);
                        }
                        _ => (),
                    }
                }
                for candidate in &candidates {
                    if date_le(start, candidate) && date_le(candidate, end) {
                        return true;
                    }
                }
                if let Datey::Range(range) = other {
                    if let (Some(other_start), Some(other_end)) =
                        (range.start.as_ref(), range.end.as_ref())
                    {
                        for bound in [start, end] {
                            if date_le(other_start, bound) && date_le(bound, other_end) {
                                return true;
                            }
                        }
                    }
                }
                false
            }
            (Some(start), None) => {
                // two ranges with start dates only always overlap
                if let Datey::Range(range) = other {
                    if range.end.is_none() {
                        return true;
                    }
                }
                candidates.iter().any(|candidate| date_le(start, candidate))
            }
            (None, Some(end)) => {
                // two ranges with end dates only always overlap
                if let Datey::Range(range) = other {
                    if range.start.is_none() {
                        return true;
                    }
                }
                candidates.iter().any(|candidate| date_le(candidate, end))
            }
            (None, None) => false,
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.comparable() || !other.comparable() {
            return None;
        }
        let self_start = self.start.as_ref().filter(|date| date.comparable());
        let self_end = self.end.as_ref().filter(|date| date.comparable());
        let other_start = other.start.as_ref().filter(|date| date.comparable());
        let other_end = other.end.as_ref().filter(|date| date.comparable());
        match (self_start, other_start) {
            (Some(this), Some(that)) => match this.partial_cmp(that) {
                Some(Ordering::Equal) => match (self_end, other_end) {
                    (None, None) => Some(Ordering::Equal),
                    (Some(this_end), Some(that_end)) => this_end.partial_cmp(that_end),
                    // a range lacking an end reaches further into the future
                    (Some(_), None) => Some(Ordering::Less),
                    (None, Some(_)) => Some(Ordering::Greater),
                },
                ordering => ordering,
            },
            (Some(this), None) => match this.partial_cmp(other_end?) {
                // a range that starts where another closes lies after it
                Some(Ordering::Equal) => Some(Ordering::Greater),
                ordering => ordering,
            },
            (None, Some(that)) => match self_end?.partial_cmp(that) {
                Some(Ordering::Equal) => Some(Ordering::Less),
                ordering => ordering,
            },
            (None, None) => self_end?.partial_cmp(other_end?),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => write!(f, "{}..{}", start, end),
            (Some(start), None) => write!(f, "{}..", start),
            (None, Some(end)) => write!(f, "..{}", end),
            (None, None) => write!(f, ".."),
        }
    }
}

fn date_le(a: &Date, b: &Date) -> bool {
    matches!(a.partial_cmp(b), Some(Ordering::Less | Ordering::Equal))
}

fn date_ge(a: &Date, b: &Date) -> bool {
    matches!(a.partial_cmp(b), Some(Ordering::Greater | Ordering::Equal))
}

// ------------- Datey -------------
/// Either a single possibly-partial [`Date`] or a [`DateRange`]. Ordering,
/// containment and formatting consume both uniformly.
#[derive(Clone, Debug, PartialEq)]
pub enum Datey {
    Date(Date),
    Range(DateRange),
}

impl Datey {
    pub fn comparable(&self) -> bool {
        match self {
            Datey::Date(date) => date.comparable(),
            Datey::Range(range) => range.comparable(),
        }
    }
    /// Overlap check: a date contains another date only if they are equal,
    /// and it lies within a range if the range overlaps it.
    pub fn contains(&self, other: &Datey) -> bool {
        match (self, other) {
            (Datey::Date(this), Datey::Date(that)) => this == that,
            (Datey::Date(this), Datey::Range(that)) => that.contains(&Datey::Date(this.clone())),
            (Datey::Range(this), _) => this.contains(other),
        }
    }
}

impl From<Date> for Datey {
    fn from(date: Date) -> Self {
        Datey::Date(date)
    }
}

impl From<DateRange> for Datey {
    fn from(range: DateRange) -> Self {
        Datey::Range(range)
    }
}

impl PartialOrd for Datey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Datey::Date(this), Datey::Date(that)) => this.partial_cmp(that),
            (Datey::Date(this), Datey::Range(that)) => {
                this.to_range().ok()?.partial_cmp(that)
            }
            (Datey::Range(this), Datey::Date(that)) => {
                this.partial_cmp(&that.to_range().ok()?)
            }
            (Datey::Range(this), Datey::Range(that)) => this.partial_cmp(that),
        }
    }
}

impl fmt::Display for Datey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Datey::Date(date) => write!(f, "{}", date),
            Datey::Range(range) => write!(f, "{}", range),
        }
    }
}

// ------------- Dateval parsing -------------
// The literal notation used by Gramps-style exports: YYYY-MM-DD where a
// zero part means "unknown", optionally preceded by ~ for fuzziness.
lazy_static! {
    static ref DATEVAL: Regex = Regex::new(r"^(~?)(\d{1,4})(?:-(\d{1,2})(?:-(\d{1,2}))?)?$").unwrap();
    static ref BETWEEN: Regex = Regex::new(r"^between\s+(.+?)\s+and\s+(.+)$").unwrap();
}

pub fn parse_dateval(literal: &str) -> Result<Date> {
    let captures = DATEVAL.captures(literal.trim()).ok_or_else(|| KindredError::Parse {
        message: format!("not a dateval literal: '{}'", literal),
    })?;
    let part = |index: usize| {
        captures
            .get(index)
            .map(|m| m.as_str().parse::<u32>().unwrap_or(0))
            .filter(|&value| value != 0)
    };
    let date = Date::from_parts(part(2).map(|year| year as i32), part(3), part(4));
    if captures.get(1).is_some_and(|m| !m.as_str().is_empty()) {
        Ok(date.fuzzy())
    } else {
        Ok(date)
    }
}

/// Parses a datey literal: a bare dateval, `before DATEVAL`, `after DATEVAL`
/// or `between DATEVAL and DATEVAL`, the latter three producing boundary
/// ranges the way Gramps-style exports mark them.
pub fn parse_datey(literal: &str) -> Result<Datey> {
    let literal = literal.trim();
    if let Some(rest) = literal.strip_prefix("before ") {
        return Ok(DateRange::until(parse_dateval(rest)?)
            .with_end_boundary()
            .into());
    }
    if let Some(rest) = literal.strip_prefix("after ") {
        return Ok(DateRange::since(parse_dateval(rest)?)
            .with_start_boundary()
            .into());
    }
    if let Some(captures) = BETWEEN.captures(literal) {
        let start = parse_dateval(captures.get(1).unwrap().as_str())?;
        let end = parse_dateval(captures.get(2).unwrap().as_str())?;
        return Ok(DateRange::between(start, end)
            .with_start_boundary()
            .with_end_boundary()
            .into());
    }
    Ok(parse_dateval(literal)?.into())
}
