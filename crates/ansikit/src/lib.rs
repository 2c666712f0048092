#![forbid(unsafe_code)]

//! Terminal control: raw mode, cursor-position queries, and a facade over the
//! escape-sequence catalogue in [`codes`].
//!
//! - [`platform`]: raw-mode backends for POSIX (termios or `stty`) and the
//!   Windows console, chosen once from the OS name.
//! - [`cursor_query`]: the `ESC [ 6 n` request and its `ESC [ row ; col R`
//!   reply, degrading to (1,1) instead of failing.
//! - [`terminal`]: [`Terminal`], the entry point for everything else.
//! - [`style`]: start/end wrapping for text attributes and colors.
//! - [`restore`]: putting the terminal back on panic, signal, or exit.

pub mod config;
pub mod cursor_query;
pub mod error;
pub mod geometry;
pub mod platform;
pub mod restore;
pub mod style;
pub mod terminal;

pub use ansikit_codes as codes;

pub use config::{DEFAULT_REPLY_TIMEOUT, PosixStrategy, QueryConfig, TerminalConfig};
pub use cursor_query::{ByteSource, CursorReport, FallbackReason, ReaderBytes, StdinBytes};
pub use error::{Result, TerminalError};
pub use geometry::{CursorPosition, ViewportSize};
pub use platform::{PlatformBackend, PlatformKind, RawModeControl, RawModeSession};
pub use terminal::{RawMode, Terminal};
