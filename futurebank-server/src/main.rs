use futurebank_server::{AppState, Config, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "futurebank_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FutureBank server...");

    let config = Config::from_env()?;
    config.validate()?;

    let state = AppState::from_config(&config)?;

    let disabled = state.features.disabled();
    if !disabled.is_empty() {
        tracing::info!("Disabled features: {}", disabled.join(", "));
    }

    // Build router with all API endpoints
    let app = create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind_addr, e))?;

    axum::serve(listener, app).await?;

    Ok(())
}
