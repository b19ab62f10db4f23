//! goodtel gateway binary.
//!
//! - `POST /v1/evaluate`, `GET /v1/examples`, `GET /healthz`, `GET /metrics`
//! - Config: `$GOODTEL_CONFIG` or `goodtel.yaml`, then env overrides

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use goodtel_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load()?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| format!("server.listen must be a valid SocketAddr: {e}"))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "goodtel-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
