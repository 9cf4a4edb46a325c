mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use plexus::{render_snapshot, PlexusConfig};

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    match cli.command.unwrap_or(Commands::Run {
        config: None,
        seed: None,
    }) {
        Commands::Run { config, seed } => {
            let config = load_config(config.as_deref(), seed)?;
            plexus::window::run(config)?;
            Ok(())
        }

        Commands::Snapshot {
            width,
            height,
            frames,
            output,
            pointer,
            config,
            seed,
        } => {
            let config = load_config(config.as_deref(), seed)?;
            let canvas = render_snapshot(&config, width, height, frames, pointer);
            canvas
                .save_png(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
            Ok(())
        }

        Commands::Config => {
            print!("{}", PlexusConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<PlexusConfig> {
    let mut config = match path {
        Some(path) => PlexusConfig::load(path)?,
        None => PlexusConfig::default(),
    };
    if seed.is_some() {
        config.particles.seed = seed;
    }
    config.validate()?;
    Ok(config)
}
