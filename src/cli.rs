// CLI module for handling command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hatchery")]
#[command(about = "Generate game-server panel eggs from CurseForge and Modrinth modpack URLs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a modpack URL and print its metadata and egg as JSON
    Resolve {
        url: String,

        /// Java version to target instead of the detected one
        #[arg(long, value_parser = clap::value_parser!(u32).range(8..=25))]
        java: Option<u32>,

        /// Print only the egg, ready for panel import
        #[arg(long)]
        egg_only: bool,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Write the JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show which platform a URL belongs to
    Detect { url: String },
}
