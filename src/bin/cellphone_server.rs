use cellphone_service::{service, telemetry, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    telemetry::init_tracing();

    let config = ServerConfig::load()?;
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "can not listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        tracing::info!("shutting down");
    };

    service::serve(&config, shutdown).await
}
