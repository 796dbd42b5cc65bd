//! CLI entrypoint for conductor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use conductor_application::{ChatTurnError, ChatTurnInput, ChatTurnUseCase};
use conductor_domain::{Media, ProviderId, Turn, providers};
use conductor_infrastructure::{ConfigLoader, DispatchGateway, LocalToolExecutor};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "conductor")]
#[command(about = "Tool-calling chat orchestrator for multiple LLM providers")]
#[command(version)]
struct Cli {
    /// The message to send
    message: Option<String>,

    /// Provider to use (google, qwen, deepseek, kimi)
    #[arg(short, long, default_value = "qwen")]
    provider: String,

    /// Model id; defaults to the provider's first catalog entry
    #[arg(short, long)]
    model: Option<String>,

    /// Disable tool calling for this turn
    #[arg(long)]
    no_tools: bool,

    /// JSON file with prior conversation turns
    #[arg(long)]
    history: Option<PathBuf>,

    /// File containing a base64-encoded media payload
    #[arg(long, requires = "media_mime")]
    media: Option<PathBuf>,

    /// MIME type of the media payload (e.g. image/png, video/mp4)
    #[arg(long)]
    media_mime: Option<String>,

    /// Config file path (overrides the default lookup)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore all config files, use defaults and environment only
    #[arg(long)]
    no_config: bool,

    /// List known providers and models, then exit
    #[arg(long)]
    list_models: bool,

    /// Print the raw response object as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.list_models {
        print_catalog();
        return Ok(());
    }

    let Some(message) = cli.message else {
        bail!("A message is required (or use --list-models).");
    };

    let provider: ProviderId = cli
        .provider
        .parse()
        .with_context(|| format!("unknown provider '{}'", cli.provider))?;
    let model = match cli.model {
        Some(model) => model,
        None => default_model(provider)?,
    };

    let settings = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    info!(provider = %provider, model = %model, "starting conductor");

    // === Dependency Injection ===
    let gateway = Arc::new(DispatchGateway::new(&settings));
    let executor = Arc::new(LocalToolExecutor::new(&settings));
    let use_case = ChatTurnUseCase::new(gateway, executor);

    let mut input = ChatTurnInput::new(message, provider, model);
    if cli.no_tools {
        input = input.without_tools();
    }
    if let Some(path) = &cli.history {
        input = input.with_history(load_history(path)?);
    }
    if let Some(path) = &cli.media {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading media file {}", path.display()))?;
        // media_mime presence is enforced by clap
        let mime = cli.media_mime.clone().unwrap_or_default();
        input = input.with_media(Media::new(data.trim(), mime));
    }

    // Ctrl-C abandons the turn cleanly
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    match use_case.execute(input, &cancel).await {
        Ok(output) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }
            for record in &output.tool_calls {
                println!("[{}] {}", record.tool_name, record.result);
            }
            if !output.tool_calls.is_empty() {
                println!();
            }
            println!("{}", output.text);
            Ok(())
        }
        Err(ChatTurnError::Cancelled) => {
            eprintln!("Cancelled.");
            std::process::exit(130);
        }
        Err(ChatTurnError::Provider(failure)) => {
            if cli.json {
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&failure.to_response_json())?
                );
            } else {
                eprintln!("[{}] {}", failure.kind.tag(), failure.user_message);
                eprintln!("{}", failure.suggestion);
                if let Some(alt) = &failure.alternative {
                    eprintln!("Try: {} / {}", alt.provider, alt.model);
                }
            }
            std::process::exit(1);
        }
    }
}

fn default_model(provider: ProviderId) -> Result<String> {
    let entry = conductor_domain::find_provider(provider)
        .and_then(|p| p.models.first())
        .map(|m| m.id.clone());
    match entry {
        Some(model) => Ok(model),
        None => bail!("provider '{}' has no models in the catalog", provider),
    }
}

fn load_history(path: &PathBuf) -> Result<Vec<Turn>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading history file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing history file {}", path.display()))
}

fn print_catalog() {
    for provider in providers() {
        println!("{} ({})", provider.display_name, provider.id);
        for model in &provider.models {
            let mut caps = Vec::new();
            if model.supports_vision {
                caps.push("vision");
            }
            if model.supports_video {
                caps.push("video");
            }
            let suffix = if caps.is_empty() {
                String::new()
            } else {
                format!("  [{}]", caps.join(", "))
            };
            println!("  {}{}", model.id, suffix);
        }
        println!();
    }
}
