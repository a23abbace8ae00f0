use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pairdiff",
    version,
    about = "TUI diff viewer for two files or two directory trees"
)]
pub struct Cli {
    /// Left (old) file or directory
    pub left: PathBuf,

    /// Right (new) file or directory
    pub right: PathBuf,

    /// Number of context lines around each change (overrides the config file)
    #[arg(short = 'c', long)]
    pub context: Option<usize>,

    /// Color theme (one-dark, github-dark, dracula, solarized-dark)
    #[arg(long)]
    pub theme: Option<String>,

    /// Read configuration from this file instead of ~/.config/pairdiff/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
