use dotenvy::dotenv;
use tracing::{error, info};

use registration_api::bootstrap::config::RegisterClientConfig;
use registration_api::infrastructure::client::register_client_reqwest::ReqwestRegisterClient;

/// Sends one registration request and logs the outcome.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "register_client=info".into()),
        )
        .init();

    let cfg = RegisterClientConfig::from_env();
    let client = ReqwestRegisterClient::new(cfg.url);

    match client.register(&cfg.email, &cfg.password).await {
        Ok(body) => info!(endpoint = client.endpoint(), %body, "register_succeeded"),
        Err(e) => error!(endpoint = client.endpoint(), error = %e, "register_failed"),
    }
    Ok(())
}
