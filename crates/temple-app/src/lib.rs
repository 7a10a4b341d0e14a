pub mod cli;
pub mod config;
pub mod input;
pub mod interrupt;
pub mod logging;
pub mod session;
pub mod store;
pub mod terminal;

use std::io;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::input::Console;
use crate::interrupt::install_interrupt_handler;
use crate::logging::{init_logging, structured_log_path};
use crate::session::{Session, renderer_for};
use crate::store::JsonFileStore;
use crate::terminal::TerminalView;

/// Loads configuration, installs logging and runs the menu on stdin/stdout.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    let clamped = cli.apply_to(&mut config);
    config.validate().context("validating command-line overrides")?;

    let guard = init_logging(&config.logging, config.display.color)?;
    if let Some(path) = structured_log_path(&guard) {
        info!(target: "temple_app", path = %path.display(), "structured logging enabled");
    }

    install_interrupt_handler()?;

    let renderer = renderer_for(&config);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), renderer.clone());
    let mut view = TerminalView::new(io::stdout(), renderer);

    if let Some(count) = clamped {
        warn!(
            target: "temple_app",
            requested = count.requested,
            effective = count.effective,
            "automated player count out of range"
        );
        let notice = format!(
            "Warning: {} automated players requested; using {} instead.",
            count.requested, count.effective
        );
        console.say(&notice)?;
    }

    let store = JsonFileStore::new(&config.leaderboard.path, config.leaderboard.max_entries);
    let mut session = Session::new(config, store);
    session.run(&mut console, &mut view)
}
