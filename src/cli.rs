use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gitactivity")]
#[command(about = "Show a GitHub user's recent public activity")]
pub struct CliArgs {
    /// GitHub username whose public events are listed
    #[arg(short, long)]
    pub user: String,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
