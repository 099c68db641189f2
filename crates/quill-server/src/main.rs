use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use quill_api::{AppStateInner, router};
use quill_crypto::Signer;

/// Immutable process configuration, read once at startup.
struct Config {
    secret: String,
    db_path: PathBuf,
    host: String,
    port: u16,
}

impl Config {
    fn from_env() -> anyhow::Result<Self> {
        let secret = match std::env::var("QUILL_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                warn!("QUILL_SECRET not set; using a development secret");
                "dev-secret-change-me".into()
            }
        };

        Ok(Self {
            secret,
            db_path: std::env::var("QUILL_DB_PATH")
                .unwrap_or_else(|_| "quill.db".into())
                .into(),
            host: std::env::var("QUILL_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("QUILL_PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()?,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = quill_db::Database::open(&config.db_path)?;

    let state = Arc::new(AppStateInner {
        db,
        signer: Signer::new(config.secret),
    });

    let app = router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Quill listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
