// src/main.rs
// Groq Chat - browser chat assistant over Groq-hosted models

use anyhow::Result;
use clap::{Parser, Subcommand};
use groq_chat::config::{self, CliOverrides, Settings};
use groq_chat::llm::{GroqClientFactory, LlmHttpClient};
use groq_chat::web::{self, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "groq-chat")]
#[command(about = "Chat with Groq-hosted models in the browser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address to bind
    #[arg(long, global = true, env = "GROQ_CHAT_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true, env = "GROQ_CHAT_PORT")]
    port: Option<u16>,

    /// Log filter (e.g. "info", "groq_chat=debug"); RUST_LOG wins when set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the chat page (default)
    Serve,

    /// Validate configuration and exit
    Check,
}

async fn run_server(settings: Settings) -> Result<()> {
    let http = LlmHttpClient::new(settings.request_timeout, settings.connect_timeout);
    let factory = Arc::new(GroqClientFactory::new(settings.base_url.clone(), http));

    if settings.defaults.api_key.is_none() {
        info!("No API key configured; one must be entered in the page");
    }

    let state = AppState::new(&settings.defaults, factory);
    let app = web::create_router(state);

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        model = %settings.defaults.model,
        persona = %settings.defaults.persona,
        memory_length = %settings.defaults.memory_length,
        "Groq Chat running on http://{}",
        addr
    );
    println!("Groq Chat running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let overrides = CliOverrides {
        host: cli.host,
        port: cli.port,
    };
    let (settings, validation) = Settings::load(&overrides);

    match cli.command {
        None | Some(Commands::Serve) => {
            if !validation.is_valid() {
                warn!("Configuration problems, using defaults:\n{}", validation.report());
            }
            run_server(settings).await?;
        }
        Some(Commands::Check) => {
            println!("Config file: {}", config::config_path().display());
            println!("Model: {}", settings.defaults.model);
            println!("Persona: {}", settings.defaults.persona);
            println!("Memory length: {}", settings.defaults.memory_length);
            println!("Base URL: {}", settings.base_url);
            println!("Listen: {}", settings.bind_address());
            println!("{}", validation.report());
            if !validation.is_valid() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
