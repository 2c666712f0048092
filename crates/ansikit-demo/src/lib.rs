#![forbid(unsafe_code)]

//! Interactive walkthrough of the `ansikit` escape sequences, raw mode and
//! terminal queries.

pub mod cli;
pub mod logging;
pub mod menu;
pub mod screens;

use std::io::Write;

use ansikit::restore;
use ansikit::{ByteSource, RawModeControl, Result, Terminal, TerminalError};

use crate::cli::Opts;
use crate::screens::ScreenId;

/// Run the menu, or the single screen `--screen` asked for.
pub fn run_with<B, W, S>(term: &mut Terminal<B, W, S>, screen: Option<u16>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    match screen {
        Some(n) => {
            let id = ScreenId::from_number(usize::from(n))
                .ok_or(TerminalError::InvalidArgument("screen number out of range"))?;
            menu::run_screen(term, id).map(|_| ())
        }
        None => menu::run_menu(term),
    }
}

/// Run the demo on the real terminal and restore it afterwards.
pub fn run(opts: &Opts) -> Result<()> {
    let config = opts.terminal_config();
    let _signals = match restore::install_exit_handlers(&config) {
        Ok(guard) => Some(guard),
        Err(err) => {
            tracing::warn!(error = %err, "signal watcher unavailable");
            None
        }
    };

    let mut term = Terminal::with_config(std::env::consts::OS, config)?;
    term.set_window_title(screens::screen::DEMO_TITLE)?;
    let outcome = run_with(&mut term, opts.screen);
    let restored = term.restore();
    outcome.and(restored)
}
