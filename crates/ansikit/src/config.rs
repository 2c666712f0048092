#![forbid(unsafe_code)]

//! Terminal configuration and environment overrides.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `ANSIKIT_RAW_STRATEGY` | `termios` (default) or `stty` for the POSIX backend |
//! | `ANSIKIT_TTY` | Terminal device used for raw mode and size (default `/dev/tty`) |
//! | `ANSIKIT_REPLY_TIMEOUT_MS` | Cursor-reply timeout; `0` or unset blocks indefinitely |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Suggested timeout for cursor-position replies when callers opt in.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_millis(500);

/// Default controlling-terminal device.
pub const DEFAULT_TTY_PATH: &str = "/dev/tty";

/// How the POSIX backend switches the terminal into raw mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PosixStrategy {
    /// `tcgetattr` / `cfmakeraw` / `tcsetattr` on the terminal device.
    #[default]
    Termios,
    /// Spawn `stty raw -echo` and `stty cooked echo` against the device.
    Stty,
}

impl PosixStrategy {
    /// Parse a strategy name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "termios" => Some(Self::Termios),
            "stty" => Some(Self::Stty),
            _ => None,
        }
    }
}

/// Settings for the cursor-position request/reply exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryConfig {
    /// Upper bound on waiting for the full reply.
    ///
    /// `None` blocks until the terminator arrives, which hangs forever
    /// against a terminal that never answers.
    pub reply_timeout: Option<Duration>,
}

impl QueryConfig {
    /// Blocking exchange with no timeout.
    #[must_use]
    pub const fn blocking() -> Self {
        Self {
            reply_timeout: None,
        }
    }

    /// Exchange bounded by `timeout`.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            reply_timeout: Some(timeout),
        }
    }
}

/// Configuration for a [`crate::Terminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Raw-mode mechanism for the POSIX backend.
    pub posix_strategy: PosixStrategy,
    /// Terminal device for raw mode and size queries on POSIX.
    pub tty_path: PathBuf,
    /// Cursor-position exchange settings.
    pub query: QueryConfig,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            posix_strategy: PosixStrategy::default(),
            tty_path: PathBuf::from(DEFAULT_TTY_PATH),
            query: QueryConfig::default(),
        }
    }
}

impl TerminalConfig {
    /// Defaults overridden by `ANSIKIT_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("ANSIKIT_RAW_STRATEGY") {
            match PosixStrategy::parse(&val) {
                Some(strategy) => config.posix_strategy = strategy,
                None => tracing::warn!(value = %val, "ignoring unknown ANSIKIT_RAW_STRATEGY"),
            }
        }
        if let Some(val) = lookup("ANSIKIT_TTY")
            && !val.is_empty()
        {
            config.tty_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("ANSIKIT_REPLY_TIMEOUT_MS") {
            match val.trim().parse::<u64>() {
                Ok(0) => config.query = QueryConfig::blocking(),
                Ok(ms) => config.query = QueryConfig::with_timeout(Duration::from_millis(ms)),
                Err(_) => tracing::warn!(value = %val, "ignoring invalid ANSIKIT_REPLY_TIMEOUT_MS"),
            }
        }

        config
    }

    /// Replace the reply timeout.
    #[must_use]
    pub fn with_reply_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query.reply_timeout = timeout;
        self
    }

    /// Replace the POSIX raw-mode strategy.
    #[must_use]
    pub fn with_posix_strategy(mut self, strategy: PosixStrategy) -> Self {
        self.posix_strategy = strategy;
        self
    }
}
