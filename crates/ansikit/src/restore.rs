#![forbid(unsafe_code)]

//! Putting the terminal back on the way out of the process.
//!
//! Programs that crash or get interrupted while in raw mode, inside the
//! alternate buffer, or with the cursor hidden leave the user's shell
//! unusable. [`install_exit_handlers`] hooks panics and (on Unix) SIGINT and
//! SIGTERM so the restoration sequence runs first:
//!
//! 1. SGR reset (`CSI 0 m`)
//! 2. Reset scroll margins (`CSI r`)
//! 3. Show cursor (`CSI ? 25 h`)
//! 4. Leave alternate buffer (`CSI ? 1049 l`)
//! 5. Cooked mode on the terminal device

use std::io::{self, Write};
use std::sync::OnceLock;

use ansikit_codes::cursor;
use ansikit_codes::screen::{ALT_BUFFER_LEAVE, RESET_SCROLL_REGION};
use ansikit_codes::sgr::SGR_RESET;

use crate::config::TerminalConfig;
use crate::platform::{PlatformBackend, PlatformKind, RawModeControl};

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Write the output half of the restoration sequence and flush.
pub fn write_restore_sequence<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)?;
    w.write_all(RESET_SCROLL_REGION)?;
    w.write_all(cursor::SHOW)?;
    w.write_all(ALT_BUFFER_LEAVE)?;
    w.flush()
}

/// Restore stdout and the terminal mode, ignoring every failure.
pub fn best_effort_restore(config: &TerminalConfig) {
    let _ = write_restore_sequence(&mut io::stdout());
    if let Ok(kind) = PlatformKind::current() {
        let mut backend = PlatformBackend::for_kind(kind, config);
        if let Err(err) = backend.restore_cooked() {
            tracing::warn!(error = %err, "could not restore cooked mode on exit");
        }
    }
}

/// Run [`best_effort_restore`] before the previous panic hook. Installs once
/// per process; later calls keep the first configuration.
pub fn install_panic_hook(config: TerminalConfig) {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(move || {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_restore(&config);
            previous(info);
        }));
    });
}

/// Watches SIGINT/SIGTERM and restores the terminal before exiting with
/// `128 + signal`. Stops watching when dropped.
#[derive(Debug)]
pub struct SignalGuard {
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: Option<std::thread::JoinHandle<()>>,
}

impl SignalGuard {
    #[cfg(unix)]
    pub fn new(config: TerminalConfig) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name("ansikit-signals".into())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    tracing::warn!(signal, "termination signal received, restoring terminal");
                    best_effort_restore(&config);
                    std::process::exit(128 + signal);
                }
            })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }

    #[cfg(not(unix))]
    pub fn new(_config: TerminalConfig) -> io::Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Install the panic hook and the signal watcher. Keep the guard alive for
/// as long as the terminal is in use.
pub fn install_exit_handlers(config: &TerminalConfig) -> io::Result<SignalGuard> {
    install_panic_hook(config.clone());
    SignalGuard::new(config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_sequence_bytes() {
        let mut out = Vec::new();
        write_restore_sequence(&mut out).unwrap();
        assert_eq!(out, b"\x1b[0m\x1b[r\x1b[?25h\x1b[?1049l");
    }

    #[test]
    fn restore_sequence_leaves_alt_buffer_last() {
        let mut out = Vec::new();
        write_restore_sequence(&mut out).unwrap();
        assert!(out.ends_with(ALT_BUFFER_LEAVE));
        assert!(out.starts_with(SGR_RESET));
    }
}
