use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use clap::{Parser, Subcommand};
use http::{Method, header::CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use anyhow::anyhow;

use sentiovoice_gateway::{
    PromptBuilder, ServerConfig,
    config::DEFAULT_AUDIO_PATH,
    client::{self, AudioCache, FeedbackClient},
    routes,
    state::AppState,
};

/// Client download directory, kept apart from the server's audio store
const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// SentioVoice - sentiment-aware spoken replies to user feedback
#[derive(Parser, Debug)]
#[command(name = "sentiovoice")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// Load and validate configuration and prompt templates, then print a summary
    CheckConfig,

    /// Submit feedback to a running server and download the spoken reply
    Submit {
        /// Base URL of the server
        #[arg(long = "api-url", env = "API_URL", default_value = "http://localhost:8000")]
        api_url: String,

        /// Directory receiving the downloaded audio
        #[arg(long = "audio-dir", env = "UI_AUDIO_PATH", default_value = DEFAULT_DOWNLOAD_DIR)]
        audio_dir: PathBuf,

        /// Request timeout in seconds
        #[arg(long = "timeout", default_value_t = 120)]
        timeout: u64,

        /// Feedback text
        text: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = if let Some(config_path) = path {
        println!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };
    Ok(config)
}

/// Server audio directory from the same settings `serve` would load.
///
/// The client may run without Azure credentials, so a config that fails to
/// load falls back to the environment value or the default.
fn server_audio_path(config_path: Option<&PathBuf>) -> PathBuf {
    match load_config(config_path) {
        Ok(config) => config.audio_path.clone(),
        Err(_) => std::env::var("AUDIO_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_AUDIO_PATH)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cli.config.as_ref()).await,
        Commands::CheckConfig => {
            let config = load_config(cli.config.as_ref())?;
            let prompts = PromptBuilder::from_file(&config.prompt_path)
                .map_err(|e| anyhow!(e.to_string()))?;
            println!("{}", config.summary());
            println!(
                "prompt templates: OK (system prompt: {} chars)",
                prompts.system_prompt().len()
            );
            Ok(())
        }
        Commands::Submit {
            api_url,
            audio_dir,
            timeout,
            text,
        } => {
            let feedback_client = FeedbackClient::new(&api_url, Duration::from_secs(timeout))
                .map_err(|e| anyhow!(e.to_string()))?;
            let cache = AudioCache::new(audio_dir)
                .with_protected_dir(server_audio_path(cli.config.as_ref()));
            let outcome = client::submit(&feedback_client, &cache, &text).await;
            println!("{outcome}");
            Ok(())
        }
    }
}

async fn serve(config_path: Option<&PathBuf>) -> anyhow::Result<()> {
    // Load configuration from file or environment
    let config = load_config(config_path)?;

    let address = config.address();
    let cors_origins = config.cors_allowed_origins.clone();
    println!("Starting server on {address}");

    // Create application state
    let app_state = AppState::new(config)
        .await
        .map_err(|e| anyhow!(e.to_string()))?;

    // Configure CORS
    let cors_layer = if let Some(ref origins) = cors_origins {
        if origins == "*" {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(false)
        } else {
            // Parse comma-separated origins
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true)
        }
    } else {
        info!(
            "CORS not configured, defaulting to same-origin only. \
             Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
        );
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(false)
    };

    // Security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ));

    let app = routes::api::create_api_router()
        .with_state(app_state)
        .layer(cors_layer)
        .layer(security_headers);

    // Parse socket address
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    println!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
