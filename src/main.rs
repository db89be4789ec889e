mod cli;
mod config;
mod render;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use config::Settings;

#[tokio::main] // Marks the main function as asynchronous
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    let mut settings = Settings::from_env().context("invalid configuration")?;
    if let Some(username) = cli.username {
        settings.username = username;
    }
    tracing::debug!(?settings, "Loaded settings");

    let client = settings.client().context("failed to build HTTP client")?;

    match cli.command {
        Commands::Pinned => {
            let result = client
                .fetch_pinned_repositories(&settings.username, &settings.token)
                .await
                .context("failed to fetch pinned repositories")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::pinned(&result));
            }
        }
        Commands::Public => {
            let result = client
                .fetch_all_public_repositories_and_languages(&settings.username, &settings.token)
                .await
                .context("failed to fetch public repositories")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::public(&result));
            }
        }
    }

    Ok(())
}

// Logs go to stderr so `--json` output stays clean on stdout.
fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("portfolio_repos=info".parse()?))
        .init();
    Ok(())
}
