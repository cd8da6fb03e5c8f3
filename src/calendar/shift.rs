use time::{util::days_in_month, Date, Duration, Month, PrimitiveDateTime};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Unit of a navigation step through the calendar
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    /// Calendar months; the day of month is clamped to the length of the
    /// target month (Jan 31 + 1 month = Feb 28 or 29)
    Months,
    /// Calendar years, clamping Feb 29 to Feb 28 in common years
    Years,
}

impl TimeUnit {
    /// Returns `None` if the result would fall outside the supported range
    /// of dates
    pub(crate) fn add(self, when: PrimitiveDateTime, amount: i64) -> Option<PrimitiveDateTime> {
        let seconds_per = match self {
            TimeUnit::Minutes => SECONDS_PER_MINUTE,
            TimeUnit::Hours => SECONDS_PER_HOUR,
            TimeUnit::Days => SECONDS_PER_DAY,
            TimeUnit::Weeks => SECONDS_PER_WEEK,
            TimeUnit::Months => return add_months(when, amount),
            TimeUnit::Years => return add_months(when, amount.checked_mul(12)?),
        };
        when.checked_add(Duration::seconds(amount.checked_mul(seconds_per)?))
    }
}

fn add_months(when: PrimitiveDateTime, amount: i64) -> Option<PrimitiveDateTime> {
    let date = when.date();
    let month0 = i64::from(u8::from(date.month()) - 1);
    let total = i64::from(date.year())
        .checked_mul(12)?
        .checked_add(month0)?
        .checked_add(amount)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = Month::try_from(u8::try_from(total.rem_euclid(12) + 1).ok()?).ok()?;
    let day = date.day().min(days_in_month(month, year));
    let date = Date::from_calendar_date(year, month, day).ok()?;
    Some(PrimitiveDateTime::new(date, when.time()))
}

/// Move `when` to the given day of its month.  Days outside the month roll
/// over into the neighboring months, so day 0 is the last day of the
/// previous month and day 32 of January is February 1.
pub(crate) fn with_day(when: PrimitiveDateTime, day: i64) -> Option<PrimitiveDateTime> {
    let first = when.date().replace_day(1).ok()?;
    let offset = Duration::seconds(day.checked_sub(1)?.checked_mul(SECONDS_PER_DAY)?);
    let date = first.checked_add(offset)?;
    Some(PrimitiveDateTime::new(date, when.time()))
}

/// Move `when` to the given zero-based month of its year, keeping the day
/// where possible.  Months outside `0..12` roll over into neighboring years.
pub(crate) fn with_month(when: PrimitiveDateTime, month_index: i64) -> Option<PrimitiveDateTime> {
    let current = i64::from(u8::from(when.month()) - 1);
    add_months(when, month_index.checked_sub(current)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_add_fixed_units() {
        let dt = datetime!(2012 - 05 - 31 22:30);
        assert_eq!(
            TimeUnit::Minutes.add(dt, 45),
            Some(datetime!(2012 - 05 - 31 23:15))
        );
        assert_eq!(
            TimeUnit::Hours.add(dt, 2),
            Some(datetime!(2012 - 06 - 01 0:30))
        );
        assert_eq!(
            TimeUnit::Days.add(dt, -31),
            Some(datetime!(2012 - 04 - 30 22:30))
        );
        assert_eq!(
            TimeUnit::Weeks.add(dt, 1),
            Some(datetime!(2012 - 06 - 07 22:30))
        );
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(
            TimeUnit::Months.add(datetime!(2012 - 01 - 31 8:00), 1),
            Some(datetime!(2012 - 02 - 29 8:00))
        );
        assert_eq!(
            TimeUnit::Months.add(datetime!(2013 - 01 - 31 8:00), 1),
            Some(datetime!(2013 - 02 - 28 8:00))
        );
        assert_eq!(
            TimeUnit::Months.add(datetime!(2012 - 05 - 15 0:00), -5),
            Some(datetime!(2011 - 12 - 15 0:00))
        );
        assert_eq!(
            TimeUnit::Months.add(datetime!(2012 - 11 - 30 0:00), 14),
            Some(datetime!(2014 - 01 - 30 0:00))
        );
    }

    #[test]
    fn test_add_months_century_leap_years() {
        assert_eq!(
            TimeUnit::Months.add(datetime!(1900 - 01 - 31 0:00), 1),
            Some(datetime!(1900 - 02 - 28 0:00))
        );
        assert_eq!(
            TimeUnit::Months.add(datetime!(2000 - 03 - 31 0:00), -1),
            Some(datetime!(2000 - 02 - 29 0:00))
        );
        assert_eq!(
            TimeUnit::Months.add(datetime!(2012 - 03 - 31 0:00), 1),
            Some(datetime!(2012 - 04 - 30 0:00))
        );
    }

    #[test]
    fn test_add_years() {
        assert_eq!(
            TimeUnit::Years.add(datetime!(2012 - 02 - 29 0:00), 1),
            Some(datetime!(2013 - 02 - 28 0:00))
        );
        assert_eq!(
            TimeUnit::Years.add(datetime!(2012 - 05 - 01 0:00), -12),
            Some(datetime!(2000 - 05 - 01 0:00))
        );
    }

    #[test]
    fn test_add_past_end_of_time() {
        assert_eq!(TimeUnit::Years.add(datetime!(9999 - 06 - 01 0:00), 1), None);
        assert_eq!(TimeUnit::Days.add(datetime!(2012 - 05 - 01 0:00), i64::MAX), None);
        assert_eq!(TimeUnit::Months.add(datetime!(2012 - 05 - 01 0:00), i64::MIN), None);
    }

    #[test]
    fn test_with_day() {
        let dt = datetime!(2012 - 05 - 17 10:00);
        assert_eq!(with_day(dt, 3), Some(datetime!(2012 - 05 - 03 10:00)));
        assert_eq!(with_day(dt, 0), Some(datetime!(2012 - 04 - 30 10:00)));
        assert_eq!(with_day(dt, 32), Some(datetime!(2012 - 06 - 01 10:00)));
        assert_eq!(with_day(dt, -1), Some(datetime!(2012 - 04 - 29 10:00)));
    }

    #[test]
    fn test_with_month() {
        let dt = datetime!(2012 - 05 - 31 10:00);
        assert_eq!(with_month(dt, 0), Some(datetime!(2012 - 01 - 31 10:00)));
        assert_eq!(with_month(dt, 5), Some(datetime!(2012 - 06 - 30 10:00)));
        assert_eq!(with_month(dt, 12), Some(datetime!(2013 - 01 - 31 10:00)));
        assert_eq!(with_month(dt, -1), Some(datetime!(2011 - 12 - 31 10:00)));
    }
}
