use crate::help::Help;
use crate::pick::{PickDay, PickDayInput, PickDayOutput, PickDayState};
use crate::sheet::Sheet;
use crate::theme::BASE_STYLE;
use calsheet::calendar::{CalendarModel, Clock, TimeUnit};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::PrimitiveDateTime;

#[derive(Clone, Debug)]
pub(crate) struct App<C> {
    model: CalendarModel<C>,
    state: AppState,
    picked: Option<PrimitiveDateTime>,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(model: CalendarModel<C>) -> App<C> {
        App {
            model,
            state: AppState::Calendar,
            picked: None,
        }
    }

    /// Run until the user quits, returning the date they picked, if any
    pub(crate) fn run<B: Backend>(
        mut self,
        mut terminal: Terminal<B>,
    ) -> io::Result<Option<PrimitiveDateTime>> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.picked)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.shift(TimeUnit::Months, -1),
                KeyCode::Char('l') | KeyCode::Right => self.shift(TimeUnit::Months, 1),
                KeyCode::Char('k') | KeyCode::Up => self.shift(TimeUnit::Years, -1),
                KeyCode::Char('j') | KeyCode::Down => self.shift(TimeUnit::Years, 1),
                KeyCode::Char('s') => self.next_week_start(),
                KeyCode::Char('t') => self.model.shift_time(None).is_ok(),
                KeyCode::Char('p') => {
                    self.state = AppState::Picking(PickDayState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Picking(state) => {
                if matches!(key, KeyCode::Char('q' | 'p') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => state.handle_input(PickDayInput::Digit(d)),
                            None => PickDayOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(PickDayInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(PickDayInput::Enter),
                        _ => PickDayOutput::Invalid,
                    };
                    match output {
                        PickDayOutput::Ok => true,
                        PickDayOutput::Invalid => false,
                        PickDayOutput::Pick(day) => self.pick(day),
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn shift(&mut self, unit: TimeUnit, amount: i64) -> bool {
        self.model.shift_time(Some((unit, amount))).is_ok()
    }

    fn next_week_start(&mut self) -> bool {
        let start_day = self.model.export_view().week.start_day;
        self.model
            .set_week_start((start_day.rem_euclid(7) + 1) % 7)
            .is_ok()
    }

    fn pick(&mut self, day: u8) -> bool {
        let Ok(date) = self.model.pick_date(Some(day.into()), None) else {
            return false;
        };
        if self.model.refresh().is_err() {
            return false;
        }
        self.picked = Some(date);
        self.state = AppState::Quitting;
        true
    }
}

impl<C: Clock> Widget for &mut App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let sheet = Sheet(self.model.export_view());
        let [sheet_area] = Layout::vertical([sheet.height()])
            .flex(Flex::Center)
            .areas(area);
        sheet.render(sheet_area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Picking(ref mut state) = self.state {
            PickDay.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Picking(PickDayState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use calsheet::calendar::CalendarConfig;
    use time::macros::{datetime, time};
    use time::Time;

    #[derive(Clone, Debug)]
    struct Noon;

    impl Clock for Noon {
        fn now(&self) -> Time {
            time!(12:00)
        }
    }

    fn app() -> App<Noon> {
        let model =
            CalendarModel::with_clock(CalendarConfig::new(datetime!(2012 - 05 - 15 0:00)), Noon)
                .unwrap();
        App::new(model)
    }

    fn screen(app: &mut App<Noon>) -> Vec<String> {
        let area = Rect::new(0, 0, 40, 11);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_navigate_months_and_years() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.model.export_view().month.current.label, "Jun");
        assert!(app.handle_key(KeyCode::Left));
        assert!(app.handle_key(KeyCode::Left));
        assert_eq!(app.model.export_view().month.current.label, "Apr");
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.model.export_view().year.current, 2013);
        assert!(app.handle_key(KeyCode::Char('k')));
        assert!(app.handle_key(KeyCode::Char('k')));
        assert_eq!(app.model.export_view().year.current, 2011);
    }

    #[test]
    fn test_cycle_week_start() {
        let mut app = app();
        for expected in [1, 2, 3, 4, 5, 6, 0] {
            assert!(app.handle_key(KeyCode::Char('s')));
            assert_eq!(app.model.export_view().week.start_day, expected);
        }
    }

    #[test]
    fn test_render_centers_sheet() {
        let mut app = app();
        let lines = screen(&mut app);
        assert_eq!(lines[1], "                May 2012                ");
        assert_eq!(lines[2], "       Su  Mo  Tu  We  Th  Fr  Sa       ");
        assert_eq!(lines[6], "       13  14 [15] 16  17  18  19       ");
        assert_eq!(lines[9], "              Today 12:00               ");
    }

    #[test]
    fn test_pick_day() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('l')));
        assert!(app.handle_key(KeyCode::Char('p')));
        assert!(matches!(app.state, AppState::Picking(_)));
        assert!(app.handle_key(KeyCode::Char('0')));
        assert!(app.handle_key(KeyCode::Char('9')));
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Enter));
        assert!(app.quitting());
        assert_eq!(app.picked, Some(datetime!(2012 - 06 - 09 0:00)));
        assert_eq!(app.model.export_view().month.current.label, "Jun");
    }

    #[test]
    fn test_cancel_pick() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('p')));
        assert!(app.handle_key(KeyCode::Char('2')));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.picked, None);
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.state, AppState::Calendar);
        assert!(!app.handle_key(KeyCode::Char('z')));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }
}
