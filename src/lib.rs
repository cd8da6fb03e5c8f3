//! Month calendar sheets.
//!
//! A [`CalendarModel`] holds a focused date, the date whose month is on
//! display, a week-start convention, and an optional constraint on which
//! dates are available, and derives from them a [`CalendarView`]: the year,
//! a month selector, a weekday header rotated to the week start, and a grid
//! of day cells covering the displayed month plus overflow days from its
//! neighbors.
//!
//! ```
//! use calsheet::{CalendarConfig, CalendarModel, Membership};
//! use time::macros::datetime;
//!
//! let model = CalendarModel::new(
//!     CalendarConfig::new(datetime!(2012-05-01 0:00)).week_start("Mon"),
//! )?;
//! let sheet = &model.export_view().date;
//! assert_eq!(sheet.rows.len(), 5);
//! assert_eq!(sheet.rows[0].0[0].day_of_month, 30);
//! assert_eq!(sheet.rows[0].0[0].membership, Membership::Previous);
//! # Ok::<(), calsheet::CalendarError>(())
//! ```
pub mod calendar;
pub use crate::calendar::{
    Availability, CalendarConfig, CalendarError, CalendarModel, CalendarView, DateCell,
    DateGridView, Membership, SheetRows, TimeUnit, Translations, WeekStartSpec,
};
