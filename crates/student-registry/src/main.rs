use anyhow::Context;
use student_registry::{api, Config, StudentRegistry, StudentStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    let store = StudentStore::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("Failed to open store at {}", config.database_url))?;

    let app = api::router(StudentRegistry::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;

    tracing::info!("Student registry listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
