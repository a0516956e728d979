//! Catador CLI - wine quality inference server
//!
//! # Commands
//!
//! - `serve` - Load artifacts and start the inference server
//! - `validate` - Strictly check artifacts without serving
//! - `info` - Show version info

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use catador::{
    api::{create_router, AppState},
    artifact::{self, Artifacts},
    error::{CatadorError, Result},
    schema::FEATURE_COUNT,
};

/// Catador - wine quality inference server
///
/// Serves a pre-trained regression model over HTTP: submit 11
/// physicochemical measurements, get a predicted quality score.
#[derive(Parser)]
#[command(name = "catador")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the inference server
    ///
    /// Examples:
    ///   catador serve
    ///   catador serve --port 8080 --model models/model.json --scaler models/scaler.json
    ///   catador serve --demo
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Path of the model artifact
        #[arg(long, default_value = "models/model.json")]
        model: PathBuf,

        /// Path of the scaler artifact
        #[arg(long, default_value = "models/scaler.json")]
        scaler: PathBuf,

        /// Serve handcrafted demo artifacts instead of loading from disk
        #[arg(long)]
        demo: bool,
    },
    /// Strictly validate both artifacts and exit
    ///
    /// Unlike serving (which starts fail-soft with whatever loads), this
    /// exits non-zero on the first unreadable or unsound artifact.
    Validate {
        /// Path of the model artifact
        #[arg(long, default_value = "models/model.json")]
        model: PathBuf,

        /// Path of the scaler artifact
        #[arg(long, default_value = "models/scaler.json")]
        scaler: PathBuf,
    },
    /// Show version and configuration info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            model,
            scaler,
            demo,
        } => {
            let state = if demo {
                tracing::info!("serving demo artifacts");
                AppState::demo()?
            } else {
                AppState::from_artifacts(Artifacts::load(&model, &scaler))
            };
            serve(&host, port, state).await?;
        },
        Commands::Validate { model, scaler } => {
            validate_artifacts(&model, &scaler);
        },
        Commands::Info => {
            println!("Catador v{}", catador::VERSION);
            println!("Wine quality inference server");
            println!();
            println!("Features:");
            println!("  - {FEATURE_COUNT}-feature physicochemical schema");
            println!("  - Standard-scaler + gradient-boosted-trees artifacts (JSON)");
            println!("  - Fail-soft artifact loading with diagnostics endpoints");
            println!("  - REST API with Prometheus metrics");
        },
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let model_loaded = state.has_model();
    let scaler_loaded = state.has_scaler();
    let app = create_router(state);

    let addr: SocketAddr =
        format!("{host}:{port}")
            .parse()
            .map_err(|e| CatadorError::ServerError {
                message: format!("Invalid address: {e}"),
            })?;

    println!("Server listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /            - API overview");
    println!("  GET  /health      - Health check");
    println!("  GET  /docs        - API description");
    println!("  GET  /metrics     - Prometheus metrics");
    println!("  GET  /api/data    - API status");
    println!("  GET  /api/info    - Model info");
    println!("  POST /api/predict - Predict wine quality");
    if !model_loaded || !scaler_loaded {
        println!();
        println!("WARNING: artifacts missing (model: {model_loaded}, scaler: {scaler_loaded});");
        println!("         /api/predict and /api/info will report unavailable");
    }

    tracing::info!(%addr, model_loaded, scaler_loaded, "server started");

    let listener =
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CatadorError::ServerError {
                message: format!("Failed to bind {addr}: {e}"),
            })?;
    axum::serve(listener, app)
        .await
        .map_err(|e| CatadorError::ServerError {
            message: format!("Server error: {e}"),
        })?;

    Ok(())
}

fn validate_artifacts(model_path: &Path, scaler_path: &Path) {
    let mut failed = false;

    match artifact::load_model(model_path) {
        Ok(model) => {
            println!(
                "model  OK  {} ({} trees, base score {})",
                model_path.display(),
                model.trees.len(),
                model.base_score
            );
        },
        Err(e) => {
            eprintln!("model  FAIL  {}: {e}", model_path.display());
            failed = true;
        },
    }

    match artifact::load_scaler(scaler_path) {
        Ok(_) => {
            println!("scaler OK  {}", scaler_path.display());
        },
        Err(e) => {
            eprintln!("scaler FAIL  {}: {e}", scaler_path.display());
            failed = true;
        },
    }

    if failed {
        std::process::exit(1);
    }
}
