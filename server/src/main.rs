//! Module server - serves JSON conversation modules over HTTP.
//!
//! Loads modules lazily from a flat directory into an in-memory cache and
//! exposes read endpoints plus a cache-clear endpoint. `PORT` (or `--port`)
//! selects the listen port.

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use modserve::routes;
use modserve::state::AppState;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "modserve", version, about = "HTTP server for voice-agent JSON modules")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Directory containing module JSON files
    #[arg(long, env = "MODULES_DIR", default_value = "modules")]
    modules_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    modserve::logging::init();

    let args = Args::parse();

    fs::create_dir_all(&args.modules_dir)?;
    let modules_dir = args
        .modules_dir
        .canonicalize()
        .unwrap_or(args.modules_dir);

    let state = AppState::new(modules_dir.clone());

    let available = state.cache.available();
    info!(modules_dir = %modules_dir.display(), available, "starting modserve");
    if available == 0 {
        warn!("no modules found in modules directory");
    }

    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
