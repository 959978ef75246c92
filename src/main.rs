//! Layscale - rescale XML layout descriptions between screen resolutions.

mod cli;
mod config;
mod layout;
mod logger;
mod scale;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::LayoutConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);
    cli.command.warn_unknown_options();

    let config = LayoutConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }
    debug!(
        "config";
        "source {}, {} scalable names",
        config.source_resolution()?,
        config.rules().scalable_len()
    );

    match &cli.command {
        Commands::Scale { args } => cli::transform::run_scale(args, &config),
        Commands::Stretch { args, .. } => cli::transform::run_stretch(args, &config),
        Commands::Batch { args } => cli::batch::run_batch(args, &config),
    }
}
