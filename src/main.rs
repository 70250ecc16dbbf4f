use std::{env, net::SocketAddr, time::Duration};

use pagetrack::app::{router, AppState};
use sea_orm::{ConnectOptions, Database};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    // The database (and its PageView/Button tables) must already exist.
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://test.db?mode=rwc".to_string());

    info!("connecting to database: {}", database_url);

    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10));

    let db = Database::connect(opt).await?;

    info!("connected to database");

    // Sessions live in memory, keyed by cookie, and end with the browser
    // session. They do not survive a server restart.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false) // Allow non-HTTPS for development
        .with_expiry(Expiry::OnSessionEnd);

    let app = router(AppState { db }).layer(session_layer);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
