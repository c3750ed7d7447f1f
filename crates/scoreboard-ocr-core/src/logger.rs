//! Stderr logger and optional tracing subscriber.
//!
//! `init_with_level` installs a `log` backend printing
//! `[elapsed LEVEL target] message`. Records from the `scoreboard_ocr*`
//! crates pass at the requested level; everything else (image decoders and
//! the like) is capped at `warn`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const OWN_TARGET: &str = "scoreboard_ocr";

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let limit = if metadata.target().starts_with(OWN_TARGET) {
            self.level
        } else {
            self.level.min(LevelFilter::Warn)
        };
        metadata.level() <= limit
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut out = std::io::stderr().lock();
        let _ = match record.level() {
            Level::Error | Level::Warn => writeln!(
                out,
                "[{:7.3}s {:>5} {}:{}] {}",
                elapsed,
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                record.args()
            ),
            _ => writeln!(
                out,
                "[{:7.3}s {:>5} {}] {}",
                elapsed,
                record.level(),
                record.target(),
                record.args()
            ),
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the given level filter.
///
/// Repeated calls after the first successful one are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Filter used by [`init_tracing`] when `RUST_LOG` is unset: `level` for
/// this workspace, at most `warn` elsewhere.
#[cfg(feature = "tracing")]
fn default_directives(level: LevelFilter) -> String {
    let foreign = level.min(LevelFilter::Warn);
    format!(
        "{},{OWN_TARGET}={}",
        foreign.as_str().to_ascii_lowercase(),
        level.as_str().to_ascii_lowercase()
    )
}

/// Install a `tracing-subscriber` formatter on stderr, optionally emitting
/// JSON lines. `RUST_LOG` takes precedence over `level`. Span close events
/// carry recognition timings.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if json {
        let _ = builder.json().flatten_event(true).finish().try_init();
    } else {
        let _ = builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(target: &str, level: Level) -> Metadata<'_> {
        Metadata::builder().target(target).level(level).build()
    }

    #[test]
    fn foreign_targets_are_capped_at_warn() {
        let logger = StderrLogger {
            level: LevelFilter::Debug,
            started: Instant::now(),
        };
        assert!(logger.enabled(&meta("scoreboard_ocr_text::line", Level::Debug)));
        assert!(!logger.enabled(&meta("scoreboard_ocr_text::line", Level::Trace)));
        assert!(!logger.enabled(&meta("png::decoder", Level::Info)));
        assert!(logger.enabled(&meta("png::decoder", Level::Warn)));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_defaults_follow_the_requested_level() {
        assert_eq!(
            default_directives(LevelFilter::Debug),
            "warn,scoreboard_ocr=debug"
        );
        assert_eq!(
            default_directives(LevelFilter::Error),
            "error,scoreboard_ocr=error"
        );
        assert_eq!(default_directives(LevelFilter::Off), "off,scoreboard_ocr=off");
    }
}
