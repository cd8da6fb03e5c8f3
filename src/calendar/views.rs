use super::lang::{translate, Translations};
use super::weekday::{InvalidWeekStartError, WeekStartSpec, DAYS_IN_WEEK, MIN_DAYS};
use serde::Serialize;
use time::Time;

/// Month abbreviations, which double as the localization keys of the month
/// selector
static MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct YearView {
    pub current: i32,
}

// Only the displayed year for now; a selectable range of years would go here.
pub fn build_year_view(year: i32) -> YearView {
    YearView { current: year }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MonthLabel {
    pub value: u8,
    pub label: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MonthItem {
    pub value: u8,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MonthView {
    pub current: MonthLabel,
    pub items: Vec<MonthItem>,
}

/// Build the month selector.  `month_index` is zero-based (0 = January).
pub fn build_month_view(lang: Option<&Translations>, month_index: u8) -> MonthView {
    let items = std::iter::zip(0u8.., MONTHS)
        .map(|(value, key)| MonthItem {
            value,
            label: translate(lang, key).to_owned(),
            selected: value == month_index,
        })
        .collect();
    let label = MONTHS
        .get(usize::from(month_index))
        .map(|&key| translate(lang, key).to_owned())
        .unwrap_or_default();
    MonthView {
        current: MonthLabel {
            value: month_index,
            label,
        },
        items,
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct WeekdayItem {
    pub label: String,
    pub value: u8,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct WeekView {
    pub start_day: i64,
    pub items: Vec<WeekdayItem>,
}

/// Build the weekday header, rotated so that it begins on the resolved week
/// start.  Each item's `value` is its absolute weekday index (0 = Sunday).
pub fn build_week_view(
    lang: Option<&Translations>,
    spec: &WeekStartSpec,
) -> Result<WeekView, InvalidWeekStartError> {
    let start_day = spec.resolve()?;
    let offset = usize::try_from(start_day.rem_euclid(7)).unwrap_or_default();
    let items = std::iter::zip(0u8.., MIN_DAYS)
        .cycle()
        .skip(offset)
        .take(DAYS_IN_WEEK)
        .map(|(value, key)| WeekdayItem {
            label: translate(lang, key).to_owned(),
            value,
        })
        .collect();
    Ok(WeekView { start_day, items })
}

/// Wall-clock time captured when the views were last built
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TimeView {
    pub hour: u8,
    pub minute: u8,
}

pub fn build_time_view(now: Time) -> TimeView {
    TimeView {
        hour: now.hour(),
        minute: now.minute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    fn labels(view: &WeekView) -> Vec<&str> {
        view.items.iter().map(|it| it.label.as_str()).collect()
    }

    fn values(view: &WeekView) -> Vec<u8> {
        view.items.iter().map(|it| it.value).collect()
    }

    #[test]
    fn test_year_view() {
        assert_eq!(build_year_view(2012), YearView { current: 2012 });
    }

    #[test]
    fn test_month_view_selects_one() {
        let view = build_month_view(None, 4);
        assert_eq!(
            view.current,
            MonthLabel {
                value: 4,
                label: String::from("May")
            }
        );
        assert_eq!(view.items.len(), 12);
        let selected = view
            .items
            .iter()
            .filter(|it| it.selected)
            .map(|it| it.value)
            .collect::<Vec<_>>();
        assert_eq!(selected, [4]);
        assert_eq!(view.items[0].label, "Jan");
        assert_eq!(view.items[11].label, "Dec");
    }

    #[test]
    fn test_month_view_translated() {
        let lang = Translations::from_iter([("May", "mai"), ("Jun", "juin")]);
        let view = build_month_view(Some(&lang), 5);
        assert_eq!(view.current.label, "juin");
        assert_eq!(view.items[4].label, "mai");
        assert_eq!(view.items[6].label, "Jul");
    }

    #[test]
    fn test_week_view_sunday() {
        let view = build_week_view(None, &WeekStartSpec::Unset).unwrap();
        assert_eq!(view.start_day, 0);
        assert_eq!(labels(&view), ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
        assert_eq!(values(&view), [0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_week_view_monday() {
        let view = build_week_view(None, &WeekStartSpec::from("Monday")).unwrap();
        assert_eq!(view.start_day, 1);
        assert_eq!(labels(&view), ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]);
        assert_eq!(values(&view), [1, 2, 3, 4, 5, 6, 0]);
    }

    #[test]
    fn test_week_view_saturday_translated() {
        let lang = Translations::from_iter([("Sa", "Sam"), ("Su", "Dim")]);
        let view = build_week_view(Some(&lang), &WeekStartSpec::Index(6)).unwrap();
        assert_eq!(labels(&view), ["Sam", "Dim", "Mo", "Tu", "We", "Th", "Fr"]);
        assert_eq!(values(&view), [6, 0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_week_view_out_of_range_start() {
        let view = build_week_view(None, &WeekStartSpec::Index(9)).unwrap();
        assert_eq!(view.start_day, 9);
        assert_eq!(values(&view), [2, 3, 4, 5, 6, 0, 1]);
    }

    #[test]
    fn test_week_view_is_stable() {
        let spec = WeekStartSpec::from("We");
        let first = build_week_view(None, &spec).ok();
        let second = build_week_view(None, &spec).ok();
        assert!(first.is_some(), "resolving We should not fail");
        assert_eq!(first, second);
    }

    #[test]
    fn test_week_view_invalid() {
        assert_eq!(
            build_week_view(None, &WeekStartSpec::from("Funday")),
            Err(InvalidWeekStartError(String::from("Funday")))
        );
    }

    #[test]
    fn test_time_view() {
        assert_eq!(
            build_time_view(time!(9:05:59)),
            TimeView { hour: 9, minute: 5 }
        );
    }
}
