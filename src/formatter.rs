//! Log line formatting with the current game tick.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Ticks run since the process started, shared by every session.
static TICKS: AtomicU64 = AtomicU64::new(0);

/// Ticks are shown as four hex digits and wrap.
const TICK_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Formats events as `HH:MM:SS.ssss 0xTICK LEVEL target: fields`.
///
/// Timestamp and tick are dimmed and the level is colored when the writer supports ANSI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickFormatter;

impl<S, N> FormatEvent<S, N> for TickFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let ansi = writer.has_ansi_escapes();
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        let tick = format!("0x{:04X}", tick_count() & TICK_MASK);
        let level = meta.level().as_str();
        if ansi {
            let color = level_color(meta.level());
            write!(writer, "{DIM}{timestamp} {tick}{RESET} {color}{level:>5}{RESET} {DIM}{}:{RESET} ", meta.target())?;
        } else {
            write!(writer, "{timestamp} {tick} {level:>5} {}: ", meta.target())?;
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "\x1b[35m",
        Level::DEBUG => "\x1b[34m",
        Level::INFO => "\x1b[32m",
        Level::WARN => "\x1b[33m",
        Level::ERROR => "\x1b[31m",
    }
}

/// Advances the tick shown in log lines. Called once per game tick.
pub fn increment_tick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
}

/// The number of ticks run so far.
pub fn tick_count() -> u64 {
    TICKS.load(Ordering::Relaxed)
}
