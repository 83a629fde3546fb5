//! Pet and book directory server.
//!
//! Run from repo root: `cargo run -p directory-server`
//! Configure with `DATABASE_URL`, `BIND_ADDR`, `DATABASE_MAX_CONNECTIONS`, `BODY_LIMIT_BYTES` (or a `.env` file).

use directory_api::{app_routes, connect, ensure_tables, AppState, ServerConfig, StartupError};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("directory_api=info,tower_http=info")),
        )
        .init();
    let config = ServerConfig::from_env()?;

    let pool = connect(&config.database_url, config.max_connections).await?;
    ensure_tables(&pool).await?;
    let state = AppState::new(pool);

    let app = app_routes(state, config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("directory listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
