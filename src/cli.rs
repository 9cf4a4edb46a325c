//! Root CLI structure for plexus

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plexus::Vec2;

#[derive(Parser)]
#[command(name = "plexus")]
#[command(about = "Animated particle plexus backdrop", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a window and animate
    Run {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for particle placement
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render frames headlessly and write the last one as PNG
    Snapshot {
        #[arg(long, default_value_t = 1280)]
        width: u32,

        #[arg(long, default_value_t = 720)]
        height: u32,

        /// Number of frames to simulate
        #[arg(long, default_value_t = 60)]
        frames: u32,

        /// Output PNG path
        #[arg(short, long, default_value = "plexus.png")]
        output: PathBuf,

        /// Pointer position held for the whole run, as X,Y
        #[arg(long, value_parser = parse_point)]
        pointer: Option<Vec2>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for particle placement
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the default configuration as TOML
    Config,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}
