// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::chatbot::{GreetingModel, Session, StaticGreeting, TurnOutcome};
use crate::config::ConfigManager;
use crate::store::CandidateStore;
use crate::web::{start_web_server, SessionRegistry};

#[derive(Parser)]
#[command(name = "talentscout")]
#[command(about = "Scripted candidate intake assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the intake API over HTTP
    Serve {
        /// Overrides TALENTSCOUT_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one intake conversation in the terminal
    Chat {
        /// Store the candidate record when the conversation is over
        #[arg(long)]
        save: bool,
    },
    /// Export stored candidates as CSV (stdout by default)
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    config.ensure_directories().await?;
    let store = CandidateStore::new(config.environment.candidates_file.clone());

    match cli.command {
        Command::Serve { port } => {
            let greeting_model = load_greeting_model(&config)?;
            let port = port.unwrap_or(config.server.port);
            start_web_server(SessionRegistry::new(greeting_model), store, port).await
        }

        Command::Chat { save } => {
            let greeting_model = load_greeting_model(&config)?;
            run_chat(Session::new(greeting_model), &store, save).await
        }

        Command::Export { output } => {
            let count = export_candidates(&store, output.as_deref()).await?;
            info!("Exported {} candidates", count);
            Ok(())
        }
    }
}

/// Write the store as CSV to `output`, or stdout when no path is given
pub async fn export_candidates(store: &CandidateStore, output: Option<&Path>) -> Result<usize> {
    match output {
        Some(path) => {
            let file = tokio::fs::File::create(path)
                .await
                .with_context(|| format!("Failed to create file: {}", path.display()))?;
            store.export_csv(file.into_std().await).await
        }
        None => store.export_csv(std::io::stdout()).await,
    }
}

fn load_greeting_model(config: &ConfigManager) -> Result<Arc<dyn GreetingModel>> {
    let model = StaticGreeting::load(&config.environment.model_cache_dir)
        .context("Greeting model failed to load, no session can start")?;
    Ok(Arc::new(model))
}

async fn run_chat(mut session: Session, store: &CandidateStore, save: bool) -> Result<()> {
    println!("{}\n", session.start().message);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let turn = session.submit(&line);
        println!("  (sentiment: {})\n", turn.sentiment);
        println!("{}\n", turn.reply.message);

        if turn.reply.outcome == TurnOutcome::Ended {
            break;
        }
    }

    let record = session.record();
    if record.has_data() {
        println!("{}", record.summary());
        for warning in record.strict_warnings() {
            println!("⚠️  {}", warning);
        }
    }

    if save && record.has_data() {
        // Persistence problems never fail the conversation
        match store.append(record).await {
            Ok(count) => info!("Candidate saved ({} stored)", count),
            Err(e) => error!("Error saving candidate data: {:#}", e),
        }
    } else if save {
        warn!("Nothing collected, skipping save");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["talentscout", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: Some(9000) }));

        let cli = Cli::try_parse_from(["talentscout", "chat", "--save"]).unwrap();
        assert!(matches!(cli.command, Command::Chat { save: true }));

        let cli = Cli::try_parse_from(["talentscout", "export"]).unwrap();
        assert!(matches!(cli.command, Command::Export { output: None }));

        assert!(Cli::try_parse_from(["talentscout"]).is_err());
    }

    #[tokio::test]
    async fn test_export_candidates_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CandidateStore::new(tmp.path().join("candidates.json"));
        let record = crate::types::CandidateRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        };
        store.append(&record).await.unwrap();

        let output = tmp.path().join("export.csv");
        assert_eq!(export_candidates(&store, Some(&output)).await.unwrap(), 1);

        let csv = tokio::fs::read_to_string(&output).await.unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("Jane Doe"));
        assert!(!csv.contains("jane@example.com"));
    }

    #[tokio::test]
    async fn test_export_candidates_missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CandidateStore::new(tmp.path().join("candidates.json"));
        let output = tmp.path().join("missing").join("export.csv");

        assert!(export_candidates(&store, Some(&output)).await.is_err());
    }
}
