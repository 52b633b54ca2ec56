use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use kb_context::{KnowledgeService, RagConfig};

#[derive(Parser, Debug)]
#[command(name = "kb-context")]
#[command(version, about = "Knowledge-base retrieval and context assembly", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults apply when absent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the document store from the knowledge base
    Load,

    /// Print documents matching a query as JSON
    Search {
        query: Vec<String>,

        /// Maximum number of documents to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Print the assembled context for a query
    Context {
        query: Vec<String>,

        /// Word budget for the context
        #[arg(short, long)]
        max_tokens: Option<usize>,
    },

    /// Report readiness and document count as JSON
    Health,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kb_context=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RagConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Load => {
            let service = KnowledgeService::try_start(&config)?;
            println!("{}", service.health().document_count);
            service.close();
        }
        Command::Search { query, top_k } => {
            let service = KnowledgeService::try_start(&config)?;
            let top_k = top_k.unwrap_or(service.config().retrieval.top_k);
            let docs = service.retrieve(&query.join(" "), top_k)?;
            println!("{}", serde_json::to_string_pretty(&docs)?);
            service.close();
        }
        Command::Context { query, max_tokens } => {
            let service = KnowledgeService::try_start(&config)?;
            let max_tokens = max_tokens.unwrap_or(service.config().retrieval.max_tokens);
            print!("{}", service.get_context(&query.join(" "), max_tokens)?);
            service.close();
        }
        Command::Health => {
            let service = KnowledgeService::start(&config);
            let report = serde_json::json!({
                "availability": service.availability(),
                "health": service.health(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            service.close();
        }
    }

    Ok(())
}
