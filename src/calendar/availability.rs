use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use time::PrimitiveDateTime;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

type Rule = dyn Fn(PrimitiveDateTime) -> Result<bool, BoxError> + Send + Sync;

/// Constraint on which dates of the sheet can be selected
#[derive(Clone, Default)]
pub enum Availability {
    #[default]
    Unconstrained,
    /// Inclusive bounds, either of which may be absent.  Bounds are compared
    /// against full date-time values, so an `end` at midnight excludes later
    /// times on the same day.
    Range {
        start: Option<PrimitiveDateTime>,
        end: Option<PrimitiveDateTime>,
    },
    Predicate(Arc<Rule>),
}

impl Availability {
    pub fn range(start: Option<PrimitiveDateTime>, end: Option<PrimitiveDateTime>) -> Self {
        Availability::Range { start, end }
    }

    pub fn predicate<F>(rule: F) -> Self
    where
        F: Fn(PrimitiveDateTime) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        Availability::Predicate(Arc::new(rule))
    }

    pub fn is_available(&self, when: PrimitiveDateTime) -> Result<bool, AvailabilityCheckError> {
        match self {
            Availability::Unconstrained => Ok(true),
            Availability::Range { start, end } => Ok(start.is_none_or(|s| when >= s)
                && end.is_none_or(|e| when <= e)),
            Availability::Predicate(rule) => {
                rule(when).map_err(|source| AvailabilityCheckError { when, source })
            }
        }
    }
}

impl fmt::Debug for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Unconstrained => write!(f, "Unconstrained"),
            Availability::Range { start, end } => f
                .debug_struct("Range")
                .field("start", start)
                .field("end", end)
                .finish(),
            Availability::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// A custom availability rule failed while checking a date
#[derive(Debug, Error)]
#[error("availability check failed for {when}")]
pub struct AvailabilityCheckError {
    pub when: PrimitiveDateTime,
    #[source]
    pub source: BoxError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_unconstrained() {
        let avail = Availability::Unconstrained;
        assert!(avail.is_available(datetime!(1970 - 01 - 01 0:00)).is_ok_and(|b| b));
        assert!(avail.is_available(datetime!(2099 - 12 - 31 23:59)).is_ok_and(|b| b));
    }

    #[test]
    fn test_closed_range_is_inclusive() {
        let avail = Availability::range(
            Some(datetime!(2012 - 05 - 10 0:00)),
            Some(datetime!(2012 - 05 - 20 0:00)),
        );
        let check = |dt| avail.is_available(dt).ok();
        assert_eq!(check(datetime!(2012 - 05 - 09 0:00)), Some(false));
        assert_eq!(check(datetime!(2012 - 05 - 10 0:00)), Some(true));
        assert_eq!(check(datetime!(2012 - 05 - 15 12:00)), Some(true));
        assert_eq!(check(datetime!(2012 - 05 - 20 0:00)), Some(true));
        assert_eq!(check(datetime!(2012 - 05 - 21 0:00)), Some(false));
    }

    #[test]
    fn test_end_bound_compares_time_of_day() {
        let avail = Availability::range(None, Some(datetime!(2012 - 05 - 20 0:00)));
        assert_eq!(
            avail.is_available(datetime!(2012 - 05 - 20 9:30)).ok(),
            Some(false)
        );
        assert_eq!(
            avail.is_available(datetime!(1900 - 01 - 01 9:30)).ok(),
            Some(true)
        );
    }

    #[test]
    fn test_open_start() {
        let avail = Availability::range(Some(datetime!(2012 - 05 - 10 0:00)), None);
        assert_eq!(
            avail.is_available(datetime!(2012 - 05 - 09 23:59)).ok(),
            Some(false)
        );
        assert_eq!(
            avail.is_available(datetime!(3000 - 01 - 01 0:00)).ok(),
            Some(true)
        );
    }

    #[test]
    fn test_predicate_verdict() {
        let avail = Availability::predicate(|dt| Ok(dt.day() % 2 == 0));
        assert_eq!(
            avail.is_available(datetime!(2012 - 05 - 02 0:00)).ok(),
            Some(true)
        );
        assert_eq!(
            avail.is_available(datetime!(2012 - 05 - 03 0:00)).ok(),
            Some(false)
        );
    }

    #[test]
    fn test_predicate_error_propagates() {
        let avail = Availability::predicate(|_| Err("backend unavailable".into()));
        let e = avail
            .is_available(datetime!(2012 - 05 - 02 8:00))
            .unwrap_err();
        assert_eq!(e.when, datetime!(2012 - 05 - 02 8:00));
        assert_eq!(e.source.to_string(), "backend unavailable");
    }
}
