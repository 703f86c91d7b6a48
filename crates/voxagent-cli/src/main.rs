//! voxagent — asynchronous text-to-speech task service.

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voxagent_core::VoxError;
use voxagent_gateway::GatewayServer;
use voxagent_pipeline::{
    InMemoryArtifactStore, InMemoryTaskStore, SynthesisConfig, TaskPipeline,
};

#[derive(Parser)]
#[command(name = "voxagent", about = "voxagent — asynchronous TTS task service")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "voxagent.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TTS gateway server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the voices available from the configured backend
    Voices,
}

#[derive(Debug, Deserialize, Default)]
struct VoxagentConfig {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    synthesis: SynthesisConfig,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8002
}

/// Loads the config file when present; otherwise falls back to defaults so
/// the service can run from environment variables alone.
async fn load_config(path: &PathBuf) -> anyhow::Result<VoxagentConfig> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Ok(toml::from_str(&raw)
            .map_err(|e| VoxError::Config(format!("invalid config '{}': {e}", path.display())))?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(VoxagentConfig::default()),
        Err(e) => Err(VoxError::Config(format!(
            "failed to read config '{}': {e}",
            path.display()
        ))
        .into()),
    }
}

fn build_pipeline(config: VoxagentConfig) -> Arc<TaskPipeline> {
    // Config credential wins; the environment is the fallback.
    let synthesis = match config.synthesis.api_key {
        Some(ref key) if !key.is_empty() => config.synthesis,
        _ => SynthesisConfig {
            base_url: config.synthesis.base_url,
            ..SynthesisConfig::from_env()
        },
    };
    let backend: Arc<dyn voxagent_pipeline::SynthesisBackend> =
        Arc::from(synthesis.into_backend());
    info!(backend = backend.name(), "Synthesis backend selected");

    TaskPipeline::new(
        Arc::new(InMemoryTaskStore::new()),
        Arc::new(InMemoryArtifactStore::new()),
        backend,
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let pipeline = build_pipeline(config);
            let app = GatewayServer::build(pipeline);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("voxagent gateway listening on {}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Voices => {
            let pipeline = build_pipeline(config);
            let voices = pipeline
                .backend()
                .voices()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list voices: {e}"))?;

            if voices.is_empty() {
                println!("No voices available from this backend.");
            } else {
                println!("Available voices:");
                for voice in &voices {
                    println!(
                        "  {} — {} ({})",
                        voice.voice_id, voice.name, voice.category
                    );
                    if let Some(ref description) = voice.description {
                        println!("    {description}");
                    }
                }
                println!("\nTotal: {} voice(s)", voices.len());
            }
        }
    }

    Ok(())
}
