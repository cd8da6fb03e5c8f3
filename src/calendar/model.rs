use super::availability::Availability;
use super::grid::{build_date_grid, DateGridView, SheetRows};
use super::lang::{translate, Translations};
use super::shift::{with_day, with_month, TimeUnit};
use super::views::{
    build_month_view, build_time_view, build_week_view, build_year_view, MonthView, TimeView,
    WeekView, YearView,
};
use super::weekday::WeekStartSpec;
use super::{CalendarError, Clock, OutOfTimeError, SystemClock};
use serde::Serialize;
use time::{PrimitiveDateTime, Time};

/// Everything needed to set up a [`CalendarModel`]
#[derive(Clone, Debug)]
pub struct CalendarConfig {
    pub lang: Option<Translations>,
    pub focus: PrimitiveDateTime,
    pub week_start: WeekStartSpec,
    pub availability: Availability,
    pub sheet: SheetRows,
}

impl CalendarConfig {
    pub fn new(focus: PrimitiveDateTime) -> CalendarConfig {
        CalendarConfig {
            lang: None,
            focus,
            week_start: WeekStartSpec::Unset,
            availability: Availability::Unconstrained,
            sheet: SheetRows::Fixed,
        }
    }

    pub fn lang(mut self, lang: Translations) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn week_start<S: Into<WeekStartSpec>>(mut self, spec: S) -> Self {
        self.week_start = spec.into();
        self
    }

    pub fn availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn sheet(mut self, sheet: SheetRows) -> Self {
        self.sheet = sheet;
        self
    }
}

/// Snapshot of every view of the calendar, as handed to a renderer
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CalendarView {
    pub year: YearView,
    pub month: MonthView,
    pub week: WeekView,
    pub date: DateGridView,
    pub time: TimeView,
    pub today: String,
}

#[derive(Clone, Debug)]
struct CalendarState {
    lang: Option<Translations>,
    focused: PrimitiveDateTime,
    reference: PrimitiveDateTime,
    week_start: WeekStartSpec,
    availability: Availability,
    sheet: SheetRows,
}

impl CalendarState {
    // Builds the views that would result from displaying `reference` with
    // `week_start`, without committing either.
    fn render(
        &self,
        reference: PrimitiveDateTime,
        week_start: &WeekStartSpec,
        now: Time,
    ) -> Result<CalendarView, CalendarError> {
        let lang = self.lang.as_ref();
        let week = build_week_view(lang, week_start)?;
        let date = build_date_grid(
            reference,
            &self.availability,
            self.focused,
            week_start,
            self.sheet,
        )?;
        tracing::debug!(%reference, start_day = week.start_day, "rendered calendar views");
        Ok(CalendarView {
            year: build_year_view(reference.year()),
            month: build_month_view(lang, u8::from(reference.month()) - 1),
            week,
            date,
            time: build_time_view(now),
            today: translate(lang, "Today").to_owned(),
        })
    }
}

/// A month calendar sheet together with the state it is derived from.
///
/// Every mutation either replaces all of the views at once or fails without
/// changing anything.
#[derive(Clone, Debug)]
pub struct CalendarModel<C = SystemClock> {
    state: CalendarState,
    clock: C,
    view: CalendarView,
}

impl CalendarModel<SystemClock> {
    pub fn new(config: CalendarConfig) -> Result<Self, CalendarError> {
        CalendarModel::with_clock(config, SystemClock)
    }
}

impl<C: Clock> CalendarModel<C> {
    pub fn with_clock(config: CalendarConfig, clock: C) -> Result<Self, CalendarError> {
        let state = CalendarState {
            lang: config.lang,
            focused: config.focus,
            reference: config.focus,
            week_start: config.week_start,
            availability: config.availability,
            sheet: config.sheet,
        };
        let view = state.render(state.reference, &state.week_start, clock.now())?;
        Ok(CalendarModel { state, clock, view })
    }

    pub fn focused(&self) -> PrimitiveDateTime {
        self.state.focused
    }

    /// The date whose month is displayed.  Note that this may be ahead of
    /// the views after [`CalendarModel::pick_date`].
    pub fn reference(&self) -> PrimitiveDateTime {
        self.state.reference
    }

    pub fn week_start(&self) -> &WeekStartSpec {
        &self.state.week_start
    }

    /// With no step, only the time view is refreshed from the clock.
    /// Otherwise the reference date is moved by the given step and all views
    /// are rebuilt.
    pub fn shift_time(&mut self, step: Option<(TimeUnit, i64)>) -> Result<&mut Self, CalendarError> {
        let Some((unit, amount)) = step else {
            self.view.time = build_time_view(self.clock.now());
            return Ok(self);
        };
        let reference = unit
            .add(self.state.reference, amount)
            .ok_or(OutOfTimeError)?;
        self.view = self
            .state
            .render(reference, &self.state.week_start, self.clock.now())?;
        self.state.reference = reference;
        tracing::info!(?unit, amount, %reference, "moved calendar");
        Ok(self)
    }

    pub fn set_week_start<S: Into<WeekStartSpec>>(
        &mut self,
        spec: S,
    ) -> Result<&mut Self, CalendarError> {
        let spec = spec.into();
        self.view = self
            .state
            .render(self.state.reference, &spec, self.clock.now())?;
        tracing::info!(?spec, start_day = self.view.week.start_day, "changed week start");
        self.state.week_start = spec;
        Ok(self)
    }

    /// Move the reference date to the given day of month and/or zero-based
    /// month (day first) and return the result.
    ///
    /// The views are left as they were; call [`CalendarModel::refresh`] to
    /// bring them up to date.  Out-of-range values roll over into
    /// neighboring months and years.
    pub fn pick_date(
        &mut self,
        day: Option<i64>,
        month: Option<i64>,
    ) -> Result<PrimitiveDateTime, OutOfTimeError> {
        let mut picked = self.state.reference;
        if let Some(day) = day {
            picked = with_day(picked, day).ok_or(OutOfTimeError)?;
        }
        if let Some(month) = month {
            picked = with_month(picked, month).ok_or(OutOfTimeError)?;
        }
        tracing::debug!(?day, ?month, %picked, "picked date");
        self.state.reference = picked;
        Ok(picked)
    }

    /// Rebuild all views from the current state
    pub fn refresh(&mut self) -> Result<&mut Self, CalendarError> {
        self.view = self.state.render(
            self.state.reference,
            &self.state.week_start,
            self.clock.now(),
        )?;
        Ok(self)
    }

    pub fn export_view(&self) -> &CalendarView {
        &self.view
    }
}
