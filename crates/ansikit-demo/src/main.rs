#![forbid(unsafe_code)]

//! ansikit demo binary entry point.

use std::process;

use ansikit::restore::best_effort_restore;
use ansikit_demo::{cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(err) = logging::init(opts.log_file.as_deref()) {
        eprintln!("Failed to open log file: {err}");
        process::exit(1);
    }

    if let Err(err) = ansikit_demo::run(&opts) {
        tracing::error!(error = %err, "demo failed");
        best_effort_restore(&opts.terminal_config());
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
