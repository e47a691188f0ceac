use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use esg_profiler::channel::terminal;
use esg_profiler::config::Config;
use esg_profiler::flow::{FlowDeps, Variant, questions};
use esg_profiler::llm::{LlmProvider, OpenAiCompatibleProvider, RetryProvider};
use esg_profiler::store::{MemoryStore, ResponseStore, SheetsStore};

#[derive(Parser)]
#[command(name = "esg-profiler", version, about = "Conversational ESG and risk profiling chatbot")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run an interactive profiling session in the terminal
    Run {
        /// Flow variant: full, news-first or chat-only
        #[arg(long, env = "FLOW_VARIANT")]
        variant: Option<String>,
        /// Collect everything but skip the spreadsheet append
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the scripted content for a variant
    Script {
        /// Flow variant: full, news-first or chat-only
        #[arg(long)]
        variant: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Run {
        variant: None,
        dry_run: false,
    }) {
        Command::Run { variant, dry_run } => run(parse_variant(variant)?, dry_run).await,
        Command::Script { variant } => {
            print_script(parse_variant(variant)?);
            Ok(())
        }
    }
}

async fn run(variant: Variant, dry_run: bool) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let base: Arc<dyn LlmProvider> = Arc::new(OpenAiCompatibleProvider::new(config.llm.clone())?);
    let llm: Arc<dyn LlmProvider> = Arc::new(RetryProvider::new(base, config.llm.max_retries));

    let store: Arc<dyn ResponseStore> = if dry_run {
        tracing::info!("dry run: responses will not be persisted");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SheetsStore::new(config.sheets.clone())?)
    };

    terminal::run(variant, FlowDeps::new(llm, store)).await?;
    Ok(())
}

fn parse_variant(arg: Option<String>) -> anyhow::Result<Variant> {
    match arg {
        None => Ok(Variant::Full),
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e)),
    }
}

fn print_script(variant: Variant) {
    let script = variant.script();
    println!("Variante: {}", script.name);
    println!("\nPreguntas fijas:");
    for (i, question) in script.questions.iter().enumerate() {
        println!("  {}. {}", i + 1, question);
    }
    println!("\nNoticias:");
    for (i, headline) in script.news.iter().enumerate() {
        println!("  {}. {}", i + 1, headline);
    }
    if script.questionnaire {
        println!("\nCuestionario final: {} preguntas", questions().len());
    } else {
        println!("\nSin cuestionario final");
    }
}
