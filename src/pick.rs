use crate::theme::{
    pick::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 16;
const OUTER_HEIGHT: u16 = 8;
const ENTER_POS: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickDay;

impl StatefulWidget for PickDay {
    type State = PickDayState;

    /*
     * ................
     * .┌ Pick Day… ─┐.
     * .│            │.
     * .│     DD     │.
     * .│            │.
     * .│  [ENTER]   │.
     * .└────────────┘.
     * ................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Pick Day… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Entry of a two-digit day of month
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PickDayState {
    day: [Option<u8>; 2],
    pos: usize,
}

impl PickDayState {
    pub(crate) fn new() -> PickDayState {
        PickDayState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line rather than creating a
            // styled line directly so that only the "[ENTER]" text and not any
            // of its centering padding will be underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        Line::from_iter(self.day.iter().map(|dg| match dg {
            Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
            None => Span::styled("D", UNFILLED_CELL_STYLE),
        }))
    }

    pub(crate) fn handle_input(&mut self, input: PickDayInput) -> PickDayOutput {
        match (input, self.pos) {
            (PickDayInput::Digit(d), 0..ENTER_POS) => {
                self.day[self.pos] = Some(d);
                self.pos += 1;
                PickDayOutput::Ok
            }
            (PickDayInput::Backspace, 1..) => {
                self.pos -= 1;
                self.day[self.pos] = None;
                PickDayOutput::Ok
            }
            (PickDayInput::Enter, ENTER_POS) => {
                let mut day = 0u8;
                for d in self.day.iter().flatten() {
                    day = day * 10 + d;
                }
                if (1..=31).contains(&day) {
                    PickDayOutput::Pick(day)
                } else {
                    PickDayOutput::Invalid
                }
            }
            _ => PickDayOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickDayInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickDayOutput {
    Ok,
    Invalid,
    Pick(u8),
}
