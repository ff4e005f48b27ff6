mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::{Config, Settings};
use error::AppError;
use source::BingSource;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match dispatch(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = match cli.log_directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env("BINGWALL_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cli: &Cli) -> Result<ExitCode, AppError> {
    let command = cli.command();
    if !command.needs_settings() {
        app::handle_markets();
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let settings = Settings::resolve(config, cli.overrides())?;
    if !consts::is_known_market(&settings.market) {
        tracing::warn!("Market {} is not in the known list; trying anyway", settings.market);
    }

    let code = match command {
        Commands::Run => {
            let source = BingSource::new(&settings);
            app::run(&settings, &source)?;
            tracing::info!("All steps finished");
            ExitCode::SUCCESS
        }
        Commands::Render => {
            if app::handle_render(&settings) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Probe => {
            app::handle_probe(&settings, &BingSource::new(&settings))?;
            ExitCode::SUCCESS
        }
        Commands::Markets => {
            app::handle_markets();
            ExitCode::SUCCESS
        }
    };
    Ok(code)
}
