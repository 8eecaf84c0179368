//! Log output on stderr, styled to sit next to commitgen's own `✖`/`ℹ` lines.
//!
//! `-v` flags pick the level. `COMMITGEN_LOG` (env_logger filter syntax, e.g.
//! `commitgen::llm=trace`) takes over when set.

use std::io::Write;

use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use log::{Level, LevelFilter};

pub const LOG_ENV: &str = "COMMITGEN_LOG";

/// Map the `-v` count onto a log level.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn label(level: Level) -> ColoredString {
    match level {
        Level::Error => "✖ error".red().bold(),
        Level::Warn => "⚠ warn".yellow().bold(),
        Level::Info => "ℹ info".blue(),
        Level::Debug => "· debug".bright_black(),
        Level::Trace => "· trace".bright_black(),
    }
}

fn builder(verbosity: u8) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for(verbosity))
        .parse_env(Env::new().filter(LOG_ENV))
        .format(|buf, record| {
            if record.level() >= Level::Debug {
                writeln!(buf, "{} [{}] {}", label(record.level()), record.target(), record.args())
            } else {
                writeln!(buf, "{} {}", label(record.level()), record.args())
            }
        });
    builder
}

pub fn init_logger(verbosity: u8) {
    builder(verbosity).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), LevelFilter::Error);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(7), LevelFilter::Trace);
    }

    #[test]
    fn labels_carry_level_names() {
        colored::control::set_override(false);
        assert_eq!(label(Level::Error).to_string(), "✖ error");
        assert_eq!(label(Level::Warn).to_string(), "⚠ warn");
        assert_eq!(label(Level::Trace).to_string(), "· trace");
        colored::control::unset_override();
    }

    #[test]
    fn builder_honours_verbosity_without_env() {
        // COMMITGEN_LOG is not set by the test harness.
        if std::env::var_os(LOG_ENV).is_none() {
            let logger = builder(2).build();
            assert_eq!(logger.filter(), LevelFilter::Debug);
        }
    }
}
