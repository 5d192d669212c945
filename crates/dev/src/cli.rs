use std::path::PathBuf;

use crate::commands::Commands;

#[derive(clap::Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Develop storefront extensions and themes locally")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use custom config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
