#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies). Environment variables
//! with the `ANSIKIT_DEMO_*` prefix provide defaults; explicit flags win.

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use ansikit::{DEFAULT_REPLY_TIMEOUT, PosixStrategy, TerminalConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library variable that sets the reply timeout when no demo option does.
const LIBRARY_TIMEOUT_ENV: &str = "ANSIKIT_REPLY_TIMEOUT_MS";

pub const HELP_TEXT: &str = "\
ansikit demo: escape sequences, raw mode and terminal queries

USAGE:
    ansikit-demo [OPTIONS]

OPTIONS:
    --screen=N              Run screen N (1-indexed) once and exit
    --reply-timeout-ms=N    Cursor reply timeout, 0 waits forever (default: 500,
                            or ANSIKIT_REPLY_TIMEOUT_MS when set)
    --raw-strategy=NAME     POSIX raw mode via 'termios' (default) or 'stty'
    --log-file=PATH         Append tracing output to PATH
    --help, -h              Show this help message
    --version, -V           Show version

SCREENS:
    1  Cursor movement     Absolute and relative cursor motion
    2  Erase               Erase in display and in line
    3  Text attributes     Bold, dim, italic, underline and friends
    4  16 colors           Standard and bright foreground/background
    5  256 colors          Color cube and grayscale ramp
    6  True color          24-bit gradients
    7  Style nesting       Stacked styles unwinding in reverse
    8  Scroll region       Margins with scrolling inside them
    9  Alternate buffer    Switch screens without losing scrollback
   10  Window title        OSC 2 title changes
   11  Tab stops           Setting, clearing and jumping between tabs
   12  Cursor shapes       DECSCUSR block, underline and bar
   13  Cursor query        ESC[6n request and reply
   14  Viewport size       Backend size and the cursor probe
   15  Raw keyboard        Byte-by-byte key echo in raw mode

ENVIRONMENT VARIABLES:
    ANSIKIT_DEMO_SCREEN            Default for --screen
    ANSIKIT_DEMO_REPLY_TIMEOUT_MS  Default for --reply-timeout-ms
    ANSIKIT_DEMO_RAW_STRATEGY      Default for --raw-strategy
    ANSIKIT_LOG_FILE               Default for --log-file
    ANSIKIT_LOG                    Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Screen to run once instead of the menu (1-indexed).
    pub screen: Option<u16>,
    /// Cursor reply timeout in milliseconds from a flag or
    /// `ANSIKIT_DEMO_REPLY_TIMEOUT_MS`; 0 blocks.
    pub reply_timeout_ms: Option<u64>,
    /// POSIX raw-mode strategy override.
    pub raw_strategy: Option<PosixStrategy>,
    /// Log destination; no logging without it.
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            screen: None,
            reply_timeout_ms: None,
            raw_strategy: None,
            log_file: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// Prints help or version and exits when asked; prints the error and
    /// exits with status 1 on bad input.
    pub fn parse() -> Self {
        match Self::parse_from(|key| env::var(key).ok(), env::args().skip(1)) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("ansikit-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from an environment lookup and an argument list.
    pub fn parse_from<I>(lookup: impl Fn(&str) -> Option<String>, args: I) -> Result<Command, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = Self::default();

        // Environment defaults first.
        if let Some(val) = lookup("ANSIKIT_DEMO_SCREEN")
            && let Ok(n) = val.parse()
        {
            opts.screen = Some(n);
        }
        if let Some(val) = lookup("ANSIKIT_DEMO_REPLY_TIMEOUT_MS")
            && let Ok(n) = val.parse()
        {
            opts.reply_timeout_ms = Some(n);
        }
        if let Some(val) = lookup("ANSIKIT_DEMO_RAW_STRATEGY") {
            opts.raw_strategy = PosixStrategy::parse(&val);
        }
        if let Some(val) = lookup("ANSIKIT_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--screen=") {
                        match val.parse::<u16>() {
                            Ok(n) if n >= 1 => opts.screen = Some(n),
                            _ => return Err(format!("Invalid --screen value: {val}")),
                        }
                    } else if let Some(val) = other.strip_prefix("--reply-timeout-ms=") {
                        match val.parse() {
                            Ok(n) => opts.reply_timeout_ms = Some(n),
                            Err(_) => return Err(format!("Invalid --reply-timeout-ms value: {val}")),
                        }
                    } else if let Some(val) = other.strip_prefix("--raw-strategy=") {
                        match PosixStrategy::parse(val) {
                            Some(strategy) => opts.raw_strategy = Some(strategy),
                            None => return Err(format!("Invalid --raw-strategy value: {val}")),
                        }
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        if val.is_empty() {
                            return Err("Invalid --log-file value: empty path".to_string());
                        }
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Requested reply timeout: `None` when not given, `Some(None)` to block.
    #[must_use]
    pub fn reply_timeout(&self) -> Option<Option<Duration>> {
        self.reply_timeout_ms
            .map(|ms| (ms > 0).then(|| Duration::from_millis(ms)))
    }

    /// Apply the options that were given on top of `base`.
    #[must_use]
    pub fn apply_to(&self, base: TerminalConfig) -> TerminalConfig {
        let config = match self.reply_timeout() {
            Some(timeout) => base.with_reply_timeout(timeout),
            None => base,
        };
        match self.raw_strategy {
            Some(strategy) => config.with_posix_strategy(strategy),
            None => config,
        }
    }

    /// Terminal configuration: `ANSIKIT_*` environment, then these options.
    #[must_use]
    pub fn terminal_config(&self) -> TerminalConfig {
        self.terminal_config_from(|key| env::var(key).ok())
    }

    /// Terminal configuration from an environment lookup.
    ///
    /// The reply timeout comes from the demo options first, then
    /// `ANSIKIT_REPLY_TIMEOUT_MS`, then [`DEFAULT_REPLY_TIMEOUT`].
    #[must_use]
    pub fn terminal_config_from(&self, lookup: impl Fn(&str) -> Option<String>) -> TerminalConfig {
        let library_timeout_set = lookup(LIBRARY_TIMEOUT_ENV)
            .is_some_and(|val| val.trim().parse::<u64>().is_ok());
        let base = TerminalConfig::from_lookup(&lookup);
        let base = if library_timeout_set {
            base
        } else {
            base.with_reply_timeout(Some(DEFAULT_REPLY_TIMEOUT))
        };
        self.apply_to(base)
    }
}
