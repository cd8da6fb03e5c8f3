mod app;
mod help;
mod logging;
mod pick;
mod sheet;
mod theme;
use crate::app::App;
use anyhow::Context;
use calsheet::calendar::{
    Availability, CalendarConfig, CalendarModel, SheetRows, Translations, WeekStartSpec,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{
    format_description::FormatItem,
    macros::{format_description, time},
    Date, OffsetDateTime, PrimitiveDateTime,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

static YMD_HM_FMT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<PrimitiveDateTime>,
    week_start: WeekStartSpec,
    from: Option<PrimitiveDateTime>,
    until: Option<PrimitiveDateTime>,
    lang: Option<PathBuf>,
    six_rows: bool,
    json: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week-start") => {
                    opts.week_start = WeekStartSpec::Name(parser.value()?.string()?);
                }
                Arg::Long("from") => {
                    opts.from = Some(parse_moment(parser.value()?.string()?, false)?);
                }
                Arg::Long("until") => {
                    opts.until = Some(parse_moment(parser.value()?.string()?, true)?);
                }
                Arg::Short('l') | Arg::Long("lang") => {
                    opts.lang = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("six-rows") => opts.six_rows = true,
                Arg::Long("json") => opts.json = true,
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(parse_moment(value.string()?, false)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                logging::init_tracing()?;
                let model = CalendarModel::new(opts.config()?)
                    .context("failed to set up calendar")?;
                if opts.json {
                    let json = serde_json::to_string_pretty(model.export_view())
                        .context("failed to serialize calendar")?;
                    println!("{json}");
                    return Ok(());
                }
                let picked = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    Ok(App::new(model).run(terminal)?)
                })?;
                if let Some(date) = picked {
                    println!("{}", date.date());
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: calsheet [OPTIONS] [YYYY-MM-DD[ HH:MM]]");
                println!();
                println!("Month calendar sheet with a configurable week start and availability");
                println!();
                println!("Options:");
                println!("  -w, --week-start DAY  Start weeks on DAY: 0-6, or a weekday name such");
                println!("                        as Monday, Mon, or Mo [default: Sunday]");
                println!("      --from DATE       Dates before DATE are unavailable");
                println!("      --until DATE      Dates after DATE are unavailable");
                println!("  -l, --lang FILE       Read label translations from a JSON object");
                println!("      --six-rows        Add a sixth row for months that need one");
                println!("      --json            Print the calendar as JSON and exit");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl RunOptions {
    fn config(&self) -> anyhow::Result<CalendarConfig> {
        let focus = match self.date {
            Some(d) => d,
            None => OffsetDateTime::now_local()
                .context("failed to determine local date")?
                .date()
                .midnight(),
        };
        let sheet = if self.six_rows {
            SheetRows::Overflow
        } else {
            SheetRows::Fixed
        };
        let mut config = CalendarConfig::new(focus)
            .week_start(self.week_start.clone())
            .sheet(sheet);
        if self.from.is_some() || self.until.is_some() {
            config = config.availability(Availability::range(self.from, self.until));
        }
        if let Some(path) = &self.lang {
            config = config.lang(Translations::from_json_file(path)?);
        }
        Ok(config)
    }
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`.  A bare date means the start of
/// the day, or its last instant if `end_of_day` is set.
fn parse_moment(value: String, end_of_day: bool) -> Result<PrimitiveDateTime, lexopt::Error> {
    if let Ok(dt) = PrimitiveDateTime::parse(&value, &YMD_HM_FMT) {
        return Ok(dt);
    }
    match Date::parse(&value, &YMD_FMT) {
        Ok(d) if end_of_day => Ok(d.with_time(time!(23:59:59.999_999_999))),
        Ok(d) => Ok(d.midnight()),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
