use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use clap::Parser;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dirserve::{routes, AppState, Config};

#[derive(Parser, Debug)]
#[command(name = "dirserve")]
#[command(about = "Browse a directory tree over HTTP")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "DIRSERVE_PORT", default_value = "8000")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "DIRSERVE_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Root directory to open
    #[arg(short, long, env = "DIRSERVE_ROOT", default_value = ".")]
    root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, env = "DIRSERVE_VERBOSE")]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, env = "DIRSERVE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "dirserve=debug,tower_http=debug"
    } else {
        "dirserve=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    let root_dir = cli.root.canonicalize().unwrap_or_else(|_| cli.root.clone());

    if !root_dir.exists() {
        return Err(format!("Root directory does not exist: {}", root_dir.display()).into());
    }

    if !root_dir.is_dir() {
        return Err(format!("Root path is not a directory: {}", root_dir.display()).into());
    }

    info!("root: {}", root_dir.display());
    info!("port: {}", cli.port);

    let state = AppState::with_config(root_dir, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::browse_routes())
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;
    info!("Starting dirserve on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
