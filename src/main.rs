//! Contact Author - blame-driven contact affordances for a code viewer
//!
//! # Usage
//! ```bash
//! contact-author /path/to/repository          # Start the backend
//! contact-author /path/to/repository -p 3001  # Pick a port
//! ```
//!
//! The viewer posts selection changes to `/api/v1/selection`; the pipeline
//! attributes the selected line to whoever last modified it and publishes a
//! "contact the author" decoration at `/api/v1/selection/decorations`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use clap::Parser;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contact_author::attribution::GitBlameSource;
use contact_author::git::GitRepository;
use contact_author::routes;
use contact_author::session::{AttributionPipeline, DecorationHost, DecorationStore};

/// Contact Author - resolve who last touched a line and offer to email them
#[derive(Parser)]
#[command(name = "contact-author")]
#[command(about = "Blame-driven contact affordances for a code viewer", long_about = None)]
struct Cli {
    /// Path to the git repository backing the viewed documents
    #[arg(value_name = "REPO_PATH")]
    repo_path: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Seconds to wait for an attribution before giving up on it
    #[arg(long, default_value = "4")]
    attribution_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the git repository
    let repo = match GitRepository::open(&cli.repo_path) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            eprintln!("✗ Failed to open repository: {}", e);
            eprintln!("  Path: {}", cli.repo_path);
            std::process::exit(1);
        }
    };

    // Wire the selection pipeline: notices flow in over HTTP, decorations
    // come back out of the store
    let store = Arc::new(DecorationStore::default());
    let host: Arc<dyn DecorationHost> = store.clone();
    let source = Arc::new(GitBlameSource::new(repo.clone()));
    let pipeline = AttributionPipeline::new(
        source,
        host,
        Duration::from_secs(cli.attribution_timeout),
    );

    let (notices_tx, notices_rx) = mpsc::channel(64);
    tokio::spawn(pipeline.run(notices_rx));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(repo.clone(), notices_tx, store))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Contact Author");
    println!("  Repository: {}", repo.path);
    println!("  Server:     http://{}", addr);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    // Set up graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
