use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use gitactivity::cli::CliArgs;
use gitactivity::config::Config;
use gitactivity::{render, EventSource, GithubClient};

fn main() -> Result<()> {
    // Initialize tracing with env filter; stdout is reserved for the messages
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = Config::from_cli(&args)?;
    info!("Listing public activity for {}", args.user);

    let client = GithubClient::new(config.api)?;
    let response = client.fetch(&args.user)?;
    let rendered = render(&response);

    if let Some(status) = rendered.failed_status {
        error!("Event feed unavailable for {}", args.user);
        eprintln!("Error: {}", status);
        return Ok(());
    }

    for msg in &rendered.messages {
        println!("{}", msg);
    }

    Ok(())
}
