use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use tracing::info;

pub const INTERRUPT_NOTICE: &str = "\n\nGame interrupted. Thanks for playing!";

/// Installs the Ctrl-C handler. The main thread is usually parked in a blocking
/// stdin read, so the handler prints the notice and ends the process itself
/// with a success status.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        info!(target: "temple_app::interrupt", "interrupted by user");
        let mut out = io::stdout();
        let _ = writeln!(out, "{INTERRUPT_NOTICE}");
        let _ = out.flush();
        process::exit(0);
    })
    .context("installing interrupt handler")
}
