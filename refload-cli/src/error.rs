//! Errors a command can end with, and the exit status each maps to.

use refload::Error as LibError;
use std::fmt;

/// Why a command failed.
#[derive(Debug)]
pub enum CliError {
    /// Any other library failure, such as an unparsable solution file.
    Library(LibError),

    /// Arguments clap accepted but the command cannot use.
    InvalidArguments(String),

    /// Reading the filesystem or writing output failed.
    Io(std::io::Error),

    /// A configuration file or `REFLOAD_*` variable is invalid.
    Config(String),

    /// The command ran but its check failed, as with `--fail-on-missing`.
    SemanticFailure(String),
}

impl CliError {
    /// The process exit status for this error.
    ///
    /// 1 is a failed check, 4 bad arguments, 5 I/O, 6 other library errors
    /// and 7 configuration. clap itself exits with 2 on usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Library(_) => 6,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Io(io) => CliError::Io(io),
            LibError::Validation { .. } | LibError::Configuration(_) => {
                CliError::Config(e.to_string())
            }
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
