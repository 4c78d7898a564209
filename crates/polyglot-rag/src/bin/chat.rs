//! Terminal chat client
//!
//! Run with: cargo run -p polyglot-rag --features cli --bin polyglot-chat

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use polyglot_rag::{
    config::AppConfig,
    embeddings::create_embedder,
    generation::OllamaClient,
    translation::GoogleTranslator,
    ChatHistory, ChatService, LanguageSelection, RagPipeline, Speaker,
};

/// Chat with the knowledge corpus in English, Tamil, Hindi, Telugu or Kannada
#[derive(Debug, Parser)]
#[command(name = "polyglot-chat", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language selection: "Auto Detect", a language name or an ISO code
    #[arg(short, long, default_value = LanguageSelection::AUTO_LABEL)]
    language: String,

    /// Corpus file overriding the configured one
    #[arg(long)]
    corpus: Option<PathBuf>,
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polyglot_rag=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::from_env()?,
    };
    if let Some(corpus) = args.corpus {
        config.corpus.path = corpus;
    }
    let selection = LanguageSelection::from_label(&args.language);

    println!("\n  {}", style(&config.ui.title).bold());
    println!("  {}\n", style(&config.ui.subtitle).dim());

    let building = spinner("Building the knowledge index...");
    let llm = Arc::new(OllamaClient::new(&config.llm)?);
    let embedder = create_embedder(&config).await?;
    let pipeline = RagPipeline::build(&config, embedder, llm)
        .await
        .with_context(|| format!("Failed to index {}", config.corpus.path.display()))?;
    building.finish_and_clear();

    println!(
        "  {} Indexed {} chunks. Language: {}",
        style("*").cyan().bold(),
        pipeline.chunk_count(),
        style(selection.label()).cyan()
    );
    println!(
        "  {}\n",
        style("Type a message, /clear to clear the history, /quit to exit.").dim()
    );

    let translator = Arc::new(GoogleTranslator::new(&config.translation)?);
    let service = ChatService::from_config(&config, Arc::new(pipeline), translator);
    let mut history = ChatHistory::new();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("  {} {} ", Speaker::You.icon(), style("You >").green().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\n  {}", style("Session ended.").dim());
            break;
        };
        let line = line?;

        match line.trim() {
            "/quit" | "/exit" => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            "/clear" => {
                history.clear();
                println!("  {}\n", style("History cleared.").dim());
                continue;
            }
            _ => {}
        }

        let thinking = spinner("thinking...");
        let outcome = service.handle_message(&mut history, &line, selection).await;
        thinking.finish_and_clear();

        let Some(outcome) = outcome else {
            continue;
        };

        if outcome.language != "en" {
            println!(
                "  🔎 {} {}",
                style("English Translation (for processing):").bold(),
                style(&outcome.english_query).dim()
            );
        }
        println!(
            "  {} {} {}\n",
            Speaker::Bot.icon(),
            style(format!("{}:", Speaker::Bot.label())).cyan().bold(),
            outcome.answer
        );
    }

    tracing::debug!("Chat ended after {} turns", history.len());
    Ok(())
}
