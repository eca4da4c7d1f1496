use clap::Parser;
use std::path::PathBuf;

/// depsweep - interactively reclaim disk space from Python venvs and
/// node_modules folders
#[derive(Parser, Debug)]
#[command(name = "depsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Starting directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}
