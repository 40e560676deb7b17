//! Standalone entry point for the RegOps API stub.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use regops_stub::{router, StubState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("REGOPS_STUB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8090);

    let state = match std::env::var("REGOPS_STUB_SECRET") {
        Ok(secret) if !secret.is_empty() => {
            tracing::info!("bearer secret configured, tokens will be checked");
            StubState::with_secret(secret)
        }
        _ => StubState::new(),
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("regops-stub listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
