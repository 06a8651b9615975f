use habit_dashboard::{AppState, HabitRepository, StoreConfig, config::resolve_port, router};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = StoreConfig::from_env();
    info!(
        base_url = %config.base_url,
        configured = config.is_configured(),
        "remote habit store"
    );
    let state = AppState::new(HabitRepository::new(config)?);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port()));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
