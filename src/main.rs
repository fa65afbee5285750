use std::sync::Arc;

use anyhow::Context;

use card_assist::bank::MockBankApi;
use card_assist::config::ServerConfig;
use card_assist::pipeline::processor::ChatPipeline;
use card_assist::server::chat_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();

    eprintln!("🏦 Card Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Bank API: {} (simulated)", config.bank_api_url);
    eprintln!(
        "   Chat API: http://{}:{}/chat",
        config.bind_addr, config.port
    );

    let bank = Arc::new(MockBankApi::new(config.bank_api_url.clone()));
    let pipeline = Arc::new(ChatPipeline::new(bank));
    let app = chat_routes(pipeline);

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "chat server started");
    axum::serve(listener, app).await?;

    Ok(())
}
