mod availability;
mod grid;
mod lang;
mod model;
mod shift;
mod views;
mod weekday;
pub use self::availability::*;
pub use self::grid::*;
pub use self::lang::*;
pub use self::model::*;
pub use self::shift::*;
pub use self::views::*;
pub use self::weekday::{InvalidWeekStartError, WeekStartSpec};
use thiserror::Error;
use time::{OffsetDateTime, Time};

/// Source of the wall-clock time shown beneath the sheet
pub trait Clock {
    fn now(&self) -> Time;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Time {
        (**self).now()
    }
}

/// The local time of day, or UTC if the local offset cannot be determined
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .time()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error(transparent)]
    InvalidWeekStart(#[from] InvalidWeekStartError),
    #[error(transparent)]
    AvailabilityCheck(#[from] AvailabilityCheckError),
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}
