#![forbid(unsafe_code)]

//! Error type shared by the platform backends and the facade.

use std::fmt;
use std::io;

/// Errors surfaced by terminal operations.
///
/// Cursor-position queries never produce one of these: they degrade to a
/// fallback position instead (see [`crate::cursor_query::CursorReport`]).
#[derive(Debug)]
pub enum TerminalError {
    /// The OS identifier matched no backend. Fatal at construction.
    UnsupportedPlatform(String),
    /// A required argument was empty or otherwise unusable.
    InvalidArgument(&'static str),
    /// A native platform call failed.
    Platform {
        /// The operation that failed, e.g. `"GetConsoleMode(input)"`.
        op: &'static str,
        source: io::Error,
    },
    /// Raw mode was requested while a raw-mode session is already active.
    RawModeActive,
    /// Writing to or reading from the terminal streams failed.
    Io(io::Error),
}

impl TerminalError {
    /// Wrap an I/O error from a named native call.
    #[must_use]
    pub fn platform(op: &'static str, source: io::Error) -> Self {
        Self::Platform { op, source }
    }

    /// Whether this error means construction cannot proceed.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform(_))
    }

    /// Kind of the underlying I/O error; `Other` when there is none.
    #[must_use]
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::Platform { source, .. } => source.kind(),
            Self::Io(err) => err.kind(),
            _ => io::ErrorKind::Other,
        }
    }
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedPlatform(os) => write!(f, "unsupported operating system: {os}"),
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Self::Platform { op, source } => write!(f, "{op} failed: {source}"),
            Self::RawModeActive => write!(f, "raw mode is already active"),
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
        }
    }
}

impl std::error::Error for TerminalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Platform { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TerminalError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result alias for terminal operations.
pub type Result<T> = std::result::Result<T, TerminalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_messages() {
        assert_eq!(
            TerminalError::UnsupportedPlatform("plan9".into()).to_string(),
            "unsupported operating system: plan9"
        );
        assert_eq!(
            TerminalError::InvalidArgument("message must not be empty").to_string(),
            "invalid argument: message must not be empty"
        );
        assert_eq!(
            TerminalError::RawModeActive.to_string(),
            "raw mode is already active"
        );
    }

    #[test]
    fn platform_error_keeps_source() {
        let err = TerminalError::platform(
            "SetConsoleMode(input)",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("SetConsoleMode(input) failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn only_unsupported_platform_is_fatal() {
        assert!(TerminalError::UnsupportedPlatform(String::new()).is_fatal());
        assert!(!TerminalError::RawModeActive.is_fatal());
        assert!(!TerminalError::from(io::Error::other("x")).is_fatal());
    }

    #[test]
    fn io_kind_reaches_through_platform_errors() {
        let err = TerminalError::platform("tcgetattr", io::ErrorKind::NotFound.into());
        assert_eq!(err.io_kind(), io::ErrorKind::NotFound);
        assert_eq!(TerminalError::RawModeActive.io_kind(), io::ErrorKind::Other);
    }
}
