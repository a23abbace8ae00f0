mod action;
mod app;
mod cli;
mod compare;
mod components;
mod config;
mod display_map;
mod event;
mod jobs;
mod logging;
mod state;
mod theme;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

use crate::app::App;
use crate::cli::Cli;
use crate::compare::FsBackend;
use crate::event::EventReader;
use crate::theme::{Theme, THEME_NAMES};

const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    tui::install_panic_hook();

    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref(), cli.verbose)?;

    // Load config, apply CLI overrides (CLI wins)
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(ref theme_name) = cli.theme {
        if !THEME_NAMES.contains(&theme_name.as_str()) {
            tracing::warn!("Unknown theme {theme_name:?}, using {}", Theme::default().name);
        }
        config.theme = Theme::from_name(theme_name);
    }
    if let Some(context) = cli.context {
        config.context_lines = context;
    }
    tracing::debug!(
        "Theme {}, {} context lines",
        config.theme.name,
        config.context_lines
    );

    let (mut events, waker) = EventReader::new(TICK_RATE);
    let mut app = App::new(
        config,
        cli.left,
        cli.right,
        Arc::new(FsBackend),
        waker,
    );

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal, &mut events).await;
    tui::restore()?;

    if let Err(ref e) = result {
        tracing::error!("{e:#}");
        eprintln!("pairdiff: {e:#}");
    }

    result
}
