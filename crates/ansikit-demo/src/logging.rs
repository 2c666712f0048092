#![forbid(unsafe_code)]

//! Tracing setup. Stdout carries the demo itself, so logs only ever go to a
//! file.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "ANSIKIT_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install a global subscriber appending to `path`. Does nothing without a
/// path. A second call leaves the first subscriber in place.
pub fn init(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();
    if installed.is_ok() {
        tracing::info!(path = %path.display(), "logging to file");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_is_a_no_op() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let err = init(Some(Path::new("/nonexistent/dir/ansikit.log"))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
