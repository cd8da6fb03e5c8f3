use crate::theme::{
    BASE_STYLE, FOCUS_STYLE, OVERFLOW_STYLE, TITLE_STYLE, UNAVAILABLE_STYLE, WEEKDAY_STYLE,
};
use calsheet::calendar::{CalendarView, DateCell, Membership, TimeView, WeekdayItem};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::Span,
    widgets::Widget,
};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the sheet in columns
const SHEET_WIDTH: u16 = 7 * DAY_WIDTH;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

const ACS_HLINE: char = '─';

/// Draws a [`CalendarView`] as a month sheet:
///
/// ```text
///           May 2012
///  Su  Mo  Tu  We  Th  Fr  Sa
/// ────────────────────────────
///  29  30   1   2   3   4   5
///   6   7   8   9  10  11  12
///  13  14 [15] 16  17  18  19
///  20  21  22  23  24  25  26
///  27  28  29  30  31   1   2
///         Today 09:05
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Sheet<'a>(pub(crate) &'a CalendarView);

impl Sheet<'_> {
    /// Number of lines needed to draw the sheet
    pub(crate) fn height(&self) -> u16 {
        let rows = u16::try_from(self.0.date.rows.len()).unwrap_or(u16::MAX);
        HEADER_LINES.saturating_add(rows).saturating_add(1)
    }
}

impl Widget for Sheet<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([SHEET_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let view = self.0;
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&view.month.current.label, view.year.current);
        canvas.draw_header(&view.week.items);
        canvas.hline(2, 0, ACS_HLINE, SHEET_WIDTH);
        let mut y = HEADER_LINES;
        for row in &view.date.rows {
            for (col, cell) in std::iter::zip(0u16.., row) {
                canvas.draw_day(y, col, cell);
            }
            y = y.saturating_add(1);
        }
        canvas.draw_footer(y, &view.today, view.time);
    }
}

fn show(cell: &DateCell) -> Span<'static> {
    let s = if cell.membership == Membership::CurrentFocused {
        format!("[{:2}]", cell.day_of_month)
    } else {
        format!(" {:2} ", cell.day_of_month)
    };
    let style = if !cell.available {
        UNAVAILABLE_STYLE
    } else {
        match cell.membership {
            Membership::Previous | Membership::Next => OVERFLOW_STYLE,
            Membership::Current => BASE_STYLE,
            Membership::CurrentFocused => FOCUS_STYLE,
        }
    };
    Span::styled(s, style)
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, month: &str, year: i32) {
        self.print_centered(0, format!("{month} {year}"), TITLE_STYLE);
    }

    fn draw_header(&mut self, items: &[WeekdayItem]) {
        for (col, item) in std::iter::zip(0u16.., items) {
            self.mvprint(
                1,
                col * DAY_WIDTH,
                format!("{:^4.4}", item.label),
                WEEKDAY_STYLE,
            );
        }
    }

    fn draw_day(&mut self, y: u16, col: u16, cell: &DateCell) {
        let s = show(cell);
        self.mvprint(y, col * DAY_WIDTH, s.content, s.style);
    }

    fn draw_footer(&mut self, y: u16, today: &str, time: TimeView) {
        self.print_centered(
            y,
            format!("{today} {:02}:{:02}", time.hour, time.minute),
            Style::new(),
        );
    }

    fn print_centered(&mut self, y: u16, s: String, style: Style) {
        let width = u16::try_from(Span::raw(s.as_str()).width()).unwrap_or(u16::MAX);
        let x = SHEET_WIDTH.saturating_sub(width) / 2;
        self.mvprint(y, x, s, style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), Style::new());
    }
}
