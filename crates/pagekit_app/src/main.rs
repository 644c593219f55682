mod platform;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pagekit_core::PageConfig;

use platform::logging::LogDestination;
use platform::scenario::Scenario;

const LANDING_PAGE: &str = include_str!("../assets/landing.html");

/// Replays a scripted visit against a page and prints the final view model.
#[derive(Parser, Debug)]
struct Cli {
    /// HTML markup to install on; defaults to the built-in landing page.
    #[arg(long)]
    page: Option<PathBuf>,
    /// RON scenario; defaults to the built-in demo visit.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// RON page configuration; missing or malformed files fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "terminal")]
    log: LogDestination,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log);

    let config = cli
        .config
        .as_deref()
        .map(platform::persistence::load_config)
        .unwrap_or_default();
    let markup = match &cli.page {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading page markup from {}", path.display()))?,
        None => LANDING_PAGE.to_string(),
    };
    let scenario = match &cli.scenario {
        Some(path) => platform::persistence::load_scenario(path)?,
        None => Scenario::demo()?,
    };

    let view = platform::app::run(&markup, config, &scenario)?;
    let json = serde_json::to_string_pretty(&view).context("serializing the view model")?;
    println!("{json}");
    Ok(())
}
