use anyhow::Result;
use arkquery::{Client, Config, CredentialResolver, Segment};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "arkquery")]
#[command(about = "Send one multimodal prompt to an Ark-compatible responses API")]
struct CliArgs {
    /// Text prompt sent after any image segments.
    #[arg(value_name = "PROMPT")]
    prompt: String,

    /// Model (endpoint) identifier.
    #[arg(long)]
    model: String,

    /// Image URL segment; may be repeated. Images precede the prompt.
    #[arg(long = "image-url", value_name = "URL")]
    image_urls: Vec<String>,

    /// API key; overrides the environment variable and key file.
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Dotenv-format file to read the API key from as a last resort.
    #[arg(long, value_name = "PATH")]
    key_file: Option<PathBuf>,

    /// Endpoint base URL; overrides ARK_BASE_URL.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Print the full decoded response as JSON instead of just the text.
    #[arg(long)]
    raw: bool,
}

fn build_segments(args: &CliArgs) -> Vec<Segment> {
    let mut segments: Vec<Segment> = args
        .image_urls
        .iter()
        .map(|url| Segment::image(url.clone()))
        .collect();
    segments.push(Segment::text(args.prompt.clone()));
    segments
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arkquery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut resolver = CredentialResolver::new();
    if let Some(api_key) = &args.api_key {
        resolver = resolver.with_explicit(api_key.clone());
    }
    if let Some(key_file) = &args.key_file {
        resolver = resolver.with_key_file(key_file.clone());
    }

    let base_url = args.base_url.clone().unwrap_or(config.base_url.clone());
    let timeout = Duration::from_secs(config.timeout_secs);

    let client = match Client::from_resolver(&resolver, base_url, timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize client: {}", e);
            std::process::exit(1);
        }
    };

    let segments = build_segments(&args);
    info!(
        "Querying model {} with {} segment(s)",
        args.model,
        segments.len()
    );

    match client.create(&args.model, &segments).await {
        Ok(response) => {
            if args.raw {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.output_text());
            }
            Ok(())
        }
        Err(e) => {
            error!("Request failed: {}", e);
            std::process::exit(1);
        }
    }
}
