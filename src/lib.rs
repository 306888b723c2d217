use anyhow::Context;

use api::{setup_config, setup_db, setup_router};
use app::state::AppState;
use utils::{create_dev_db, migrate};

pub async fn run() -> anyhow::Result<()> {
    let config = setup_config()?;

    create_dev_db(&config.db_url);
    let conn = setup_db(&config.db_url)
        .await
        .context("Database connection failed")?;
    migrate(&conn).await.context("Migration failed")?;

    let state = AppState::from_config(conn, config.clone()).await?;
    let router = setup_router(state);

    let listener = tokio::net::TcpListener::bind(config.get_server_url())
        .await
        .with_context(|| format!("Failed to bind {}", config.get_server_url()))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
