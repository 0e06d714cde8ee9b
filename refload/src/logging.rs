//! Logging infrastructure for the refload library.
//!
//! The resolver reports every macro resolution, every discovered reference
//! edge and every failure through a [`LogSink`]. This module provides the
//! stderr-based [`Logger`] with configurable verbosity and an in-memory
//! [`MemoryLog`] that keeps the diagnostics for later inspection.

use std::cell::RefCell;
use std::env;
use std::fmt;

use crate::host::LogSink;

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use refload::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing.
    Quiet,
    /// Failures only.
    Normal,
    /// Every diagnostic, including reference edges and macro values.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use refload::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// Writes resolver diagnostics to stderr, filtered by level.
///
/// Lines written through [`LogSink::failure`] are shown from Normal upward;
/// edges, macro values and progress lines only at Verbose.
///
/// # Examples
///
/// ```
/// use refload::host::LogSink;
/// use refload::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Quiet);
/// assert!(!logger.shows_failures());
/// logger.failure("nothing is printed");
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.shows_failures());
/// assert!(!logger.shows_notes());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// A logger showing messages up to `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether failure lines are printed.
    #[must_use]
    pub fn shows_failures(&self) -> bool {
        self.level >= LogLevel::Normal
    }

    /// Whether ordinary diagnostic lines are printed.
    #[must_use]
    pub fn shows_notes(&self) -> bool {
        self.level >= LogLevel::Verbose
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl LogSink for Logger {
    fn write(&self, message: &str) {
        if self.shows_notes() {
            eprintln!("{message}");
        }
    }

    fn failure(&self, message: &str) {
        if self.shows_failures() {
            eprintln!("{message}");
        }
    }
}

/// A log sink that keeps every message in memory.
///
/// Failures are kept in [`messages`](Self::messages) along with everything
/// else, and also on their own in [`failures`](Self::failures).
///
/// # Examples
///
/// ```
/// use refload::host::LogSink;
/// use refload::MemoryLog;
///
/// let log = MemoryLog::new();
/// log.write("App.csproj -> Lib.csproj");
/// log.failure("FAILED. Lib.csproj");
/// assert_eq!(log.messages().len(), 2);
/// assert_eq!(log.failures(), vec!["FAILED. Lib.csproj".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryLog {
    messages: RefCell<Vec<String>>,
    failures: RefCell<Vec<String>>,
}

impl MemoryLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all messages written so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Returns a copy of the messages written as failures.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }

    /// Consumes the log and returns its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages.into_inner()
    }

    /// Whether any message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(needle))
    }
}

impl LogSink for MemoryLog {
    fn write(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn failure(&self, message: &str) {
        self.failures.borrow_mut().push(message.to_string());
        self.write(message);
    }
}

/// Initializes a logger based on environment variables and CLI flags.
///
/// The priority order is:
/// 1. CLI flags (verbose/quiet)
/// 2. `REFLOAD_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// If both `verbose` and `quiet` are true, `verbose` takes precedence.
///
/// # Examples
///
/// ```
/// use refload::{init_logger, LogLevel};
///
/// let logger = init_logger(true, false);
/// assert_eq!(logger.level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var("REFLOAD_LOG_MODE") {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Normal)
}
