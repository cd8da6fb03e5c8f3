use std::num::IntErrorKind;
use thiserror::Error;
use time::Weekday;

pub(crate) const DAYS_IN_WEEK: usize = 7;

static FULL_DAYS: [&str; DAYS_IN_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

static SHORT_DAYS: [&str; DAYS_IN_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Two-letter weekday names.  These double as the localization keys of the
/// weekday header.
pub(crate) static MIN_DAYS: [&str; DAYS_IN_WEEK] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

/// A caller-supplied description of which weekday begins each row of the
/// sheet
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekStartSpec {
    #[default]
    Unset,
    Index(i64),
    /// A numeric string or a full (`"Monday"`), abbreviated (`"Mon"`), or
    /// minimal (`"Mo"`) weekday name
    Name(String),
}

impl WeekStartSpec {
    /// Normalize to a weekday index, where 0 is Sunday and 6 is Saturday.
    ///
    /// Numeric input is truncated to an integer and otherwise passed through
    /// as-is, even when it lies outside `0..7`.
    pub fn resolve(&self) -> Result<i64, InvalidWeekStartError> {
        match self {
            WeekStartSpec::Unset => Ok(0),
            WeekStartSpec::Index(i) => Ok(*i),
            WeekStartSpec::Name(name) => resolve_name(name),
        }
    }
}

impl From<i64> for WeekStartSpec {
    fn from(i: i64) -> WeekStartSpec {
        WeekStartSpec::Index(i)
    }
}

impl From<&str> for WeekStartSpec {
    fn from(s: &str) -> WeekStartSpec {
        WeekStartSpec::Name(s.to_owned())
    }
}

impl From<String> for WeekStartSpec {
    fn from(s: String) -> WeekStartSpec {
        WeekStartSpec::Name(s)
    }
}

impl From<Weekday> for WeekStartSpec {
    fn from(wd: Weekday) -> WeekStartSpec {
        WeekStartSpec::Index(wd.index0().into())
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid week start: {0:?}")]
pub struct InvalidWeekStartError(pub String);

fn resolve_name(name: &str) -> Result<i64, InvalidWeekStartError> {
    if name.is_empty() {
        return Ok(0);
    }
    if let Some(i) = parse_numeric(name) {
        return Ok(i);
    }
    [&FULL_DAYS, &SHORT_DAYS, &MIN_DAYS]
        .into_iter()
        .find_map(|names| names.iter().position(|&n| n == name))
        .and_then(|pos| i64::try_from(pos).ok())
        .ok_or_else(|| InvalidWeekStartError(name.to_owned()))
}

// A string counts as numeric if it parses as a finite number, in which case
// its leading integer digits are its value ("2.9" and "2e1" are both 2).
fn parse_numeric(s: &str) -> Option<i64> {
    let s = s.trim();
    if !s.parse::<f64>().is_ok_and(f64::is_finite) {
        return None;
    }
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - sign_len);
    let int_part = &s[..sign_len + digits_len];
    match int_part.parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(i64::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Some(i64::MIN),
        // No integer digits, as in ".5"
        Err(_) => Some(0),
    }
}
