use super::availability::Availability;
use super::weekday::{WeekStartSpec, WeekdayExt, DAYS_IN_WEEK};
use super::{CalendarError, OutOfTimeError};
use serde::Serialize;
use std::iter::successors;
use time::{Date, PrimitiveDateTime};

/// Number of cells on a five-row sheet
pub const SHEET_CELLS: usize = 35;

/// Number of cells on a six-row sheet
pub const SIX_ROW_CELLS: usize = 42;

/// How to lay out a month that does not fit in five rows
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SheetRows {
    /// Always exactly five rows; days of the displayed month that would need
    /// a sixth row are left off the sheet.  If the focused day is one of
    /// them, no cell is marked focused even though the focus lies in the
    /// displayed month.
    #[default]
    Fixed,
    /// Five rows, or six when the displayed month needs them.  Only week
    /// starts outside 0..7 can need more than six; those sheets are cut off
    /// after the sixth row.
    Overflow,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Membership {
    Previous,
    Current,
    CurrentFocused,
    Next,
}

impl Membership {
    pub fn is_current(self) -> bool {
        matches!(self, Membership::Current | Membership::CurrentFocused)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct DateCell {
    /// Zero-based month (0 = January)
    pub month: u8,
    pub day_of_month: u8,
    /// 0 = Sunday
    pub weekday_index: u8,
    pub membership: Membership,
    pub available: bool,
}

/// One row of the sheet, in calendar order
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeekRow(pub [DateCell; DAYS_IN_WEEK]);

impl WeekRow {
    pub fn iter(&self) -> std::slice::Iter<'_, DateCell> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a WeekRow {
    type Item = &'a DateCell;
    type IntoIter = std::slice::Iter<'a, DateCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct FocusPoint {
    pub day_of_month: u8,
    pub weekday_index: u8,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DateGridView {
    pub focus: FocusPoint,
    pub rows: Vec<WeekRow>,
}

impl DateGridView {
    pub fn cells(&self) -> impl Iterator<Item = &DateCell> + '_ {
        self.rows.iter().flatten()
    }
}

/// Lay out the month containing `reference`.
///
/// The sheet opens with the tail of the previous month so that the 1st falls
/// in the column of its weekday, then runs through the displayed month, then
/// pads with the start of the next month up to 35 cells (or, under
/// [`SheetRows::Overflow`], up to the end of the week).  The day matching
/// `focused` (by calendar date only) is marked
/// [`Membership::CurrentFocused`] if it made it onto the sheet.  Each cell's availability is checked at
/// the reference date's time of day.
pub fn build_date_grid(
    reference: PrimitiveDateTime,
    availability: &Availability,
    focused: PrimitiveDateTime,
    spec: &WeekStartSpec,
    sheet: SheetRows,
) -> Result<DateGridView, CalendarError> {
    let start_day = spec.resolve()?;
    let first = reference
        .date()
        .replace_day(1)
        .map_err(|_| OutOfTimeError)?;

    let mut lead = i64::from(first.weekday().index0()).saturating_sub(start_day);
    if lead < 0 {
        lead += 7;
    }
    // Week starts outside 0..7 can ask for any lead; no sheet shows more than
    // SHEET_CELLS of it.
    let lead = if lead <= 0 {
        0
    } else {
        usize::try_from(lead).map_or(SHEET_CELLS, |n| n.min(SHEET_CELLS))
    };

    let mut days = Vec::with_capacity(SIX_ROW_CELLS);
    let mut previous = iter_days_before(first).take(lead).collect::<Vec<_>>();
    previous.reverse();
    days.extend(previous.into_iter().map(|d| (d, Membership::Previous)));

    let month_days = iter_month(first).collect::<Vec<_>>();
    let focused_date = focused.date();
    days.extend(month_days.iter().map(|&d| {
        if d == focused_date {
            (d, Membership::CurrentFocused)
        } else {
            (d, Membership::Current)
        }
    }));

    let limit = match sheet {
        SheetRows::Fixed => SHEET_CELLS,
        SheetRows::Overflow => SIX_ROW_CELLS,
    };
    if days.len() > limit {
        tracing::warn!(
            year = first.year(),
            month = %first.month(),
            dropped = days.len() - limit,
            "month does not fit on the sheet; truncating"
        );
        days.truncate(limit);
    }
    let trail = match days.len().checked_sub(SHEET_CELLS) {
        None => SHEET_CELLS - days.len(),
        Some(_) => (DAYS_IN_WEEK - days.len() % DAYS_IN_WEEK) % DAYS_IN_WEEK,
    };
    if let Some(&last) = month_days.last() {
        days.extend(
            iter_days_after(last)
                .take(trail)
                .map(|d| (d, Membership::Next)),
        );
    }

    let at = reference.time();
    let cells = days
        .into_iter()
        .map(|(date, membership)| {
            Ok(DateCell {
                month: u8::from(date.month()) - 1,
                day_of_month: date.day(),
                weekday_index: date.weekday().index0(),
                membership,
                available: availability.is_available(PrimitiveDateTime::new(date, at))?,
            })
        })
        .collect::<Result<Vec<_>, CalendarError>>()?;
    let rows = cells
        .chunks_exact(DAYS_IN_WEEK)
        .filter_map(|chunk| <[DateCell; DAYS_IN_WEEK]>::try_from(chunk).ok())
        .map(WeekRow)
        .collect::<Vec<_>>();
    tracing::debug!(
        start_day,
        lead,
        trail,
        rows = rows.len(),
        "built date grid"
    );

    Ok(DateGridView {
        focus: FocusPoint {
            day_of_month: focused.day(),
            weekday_index: focused.weekday().index0(),
        },
        rows,
    })
}

fn iter_month(first: Date) -> impl Iterator<Item = Date> {
    let month = first.month();
    successors(Some(first), |&d| d.next_day()).take_while(move |d| d.month() == month)
}

fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
