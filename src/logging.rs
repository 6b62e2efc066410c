use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct SerpentLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl SerpentLogger {
    // Debug and trace records only pass when their topic is listed
    fn topic_allowed(&self, level: log::Level, target: &str) -> bool {
        match &self.debug_filters {
            Some(filters) if level >= log::Level::Debug => {
                filters.contains(target) || filters.iter().any(|f| target.starts_with(f.as_str()))
            }
            _ => true,
        }
    }
}

/// Pulls the number following `marker` out of a log message.
fn number_after(message: &str, marker: &str) -> Option<u64> {
    let start = message.find(marker)? + marker.len();
    let digits: String = message[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// `[S01][T0042] ` style prefix from "Snake N" and "Step N" mentions.
fn context_prefix(message: &str) -> String {
    let mut context = String::new();
    if let Some(id) = number_after(message, "Snake ") {
        context.push_str(&format!("[S{:02}]", id));
    }
    if let Some(step) = number_after(message, "Step ") {
        context.push_str(&format!("[T{:04}]", step));
    }
    if !context.is_empty() {
        context.push(' ');
    }
    context
}

impl log::Log for SerpentLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.topic_allowed(metadata.level(), metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        let message = record.args().to_string();

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            context = context_prefix(&message),
            target = record.target(),
        );
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // A closed stdout is not worth crashing the game over
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<SerpentLogger> = OnceLock::new();

/// Installs the colored topic logger. `debug_filter` is a comma-separated topic list
/// (tick, snake, ai, food, obstacle) limiting debug/trace output.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });

    let logger = LOGGER.get_or_init(|| SerpentLogger {
        level,
        debug_filters,
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Parses a `--log-level` value, defaulting to info.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_tick {
    ($step:expr, $($arg:tt)*) => {
        log::debug!(target: "tick", "Step {} {}", $step, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_snake {
    ($snake_id:expr, $step:expr, $($arg:tt)*) => {
        log::debug!(target: "snake", "Snake {} Step {} {}", $snake_id, $step, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_ai {
    ($snake_id:expr, $($arg:tt)*) => {
        log::debug!(target: "ai", "Snake {} {}", $snake_id, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_food {
    ($($arg:tt)*) => {
        log::debug!(target: "food", "{}", format_args!($($arg)*))
    };
}
