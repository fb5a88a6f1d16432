use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::task::JoinHandle;
use tracing::{error, info};

use registration_api::bootstrap::app_context::{AppContext, AppServices};
use registration_api::bootstrap::config::Config;
use registration_api::infrastructure::crypto::Argon2PasswordHasher;
use registration_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            "registration_api=debug,axum=info,tower_http=info".into()
        }))
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting registration API");

    // Database
    let pool = registration_api::infrastructure::db::connect_pool(
        &cfg.database_url,
        cfg.database_max_connections,
    )
    .await?;
    registration_api::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new(cfg.password_hash_cost)?);
    let services = AppServices::new(user_repo, password_hasher);
    let ctx = AppContext::new(cfg.clone(), services);

    let app = registration_api::presentation::http::router(ctx);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!(?e, "Failed to listen for shutdown signal");
                }
                info!("Shutdown signal received");
            })
            .await?;
        Ok(())
    });

    match api_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }

    pool.close().await;
    Ok(())
}
