// ask-vision - ask an Ollama vision model about an image

use clap::Parser;
use ollama_vision::{Config, OllamaClient, ask_with};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Ask Ollama vision model about an image", long_about = None)]
struct Args {
    /// Name of the model to use
    #[arg(long)]
    model: String,

    /// Path to the image file
    #[arg(long)]
    image: PathBuf,

    /// Prompt/question for the model
    #[arg(long)]
    prompt: String,

    /// Optional system prompt
    #[arg(long)]
    system: Option<String>,

    /// Ollama API host (overrides config)
    #[arg(long, env = "OLLAMA_HOST")]
    host: Option<String>,

    /// Path to a configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut stdout = std::io::stdout();
    run(args, &mut stdout).await
}

/// Resolve the backend, ask once, and write the response plus a newline to `out`
async fn run(args: Args, out: &mut impl Write) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref(), args.host.as_deref())?;
    let host = config.resolve_host(args.host.as_deref())?;
    let client = OllamaClient::with_host(&host)?;

    let response = ask_with(
        &client,
        &args.model,
        &args.prompt,
        &args.image,
        args.system.as_deref(),
    )
    .await?;

    writeln!(out, "{response}")?;
    out.flush()?;

    Ok(())
}
