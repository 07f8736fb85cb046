use anyhow::Result;
use clap::Parser;
use talent_scout::cli::{handle_command, Cli};
use talent_scout::config::ConfigManager;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the chat transcript owns stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("talent_scout=info,rocket=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = ConfigManager::load()?;
    info!(
        "Candidate store: {}",
        config.environment.candidates_file.display()
    );
    info!(
        "Model cache: {}",
        config.environment.model_cache_dir.display()
    );

    handle_command(cli, config).await
}
