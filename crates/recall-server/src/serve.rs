use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;

pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub router: Router,
    pub max_concurrency: usize,
}

pub async fn serve(config: ServeConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let app = config
        .router
        .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrency));

    tracing::info!(
        event = "listening",
        addr = %addr,
        max_concurrency = config.max_concurrency
    );
    axum::serve(listener, app).await?;
    Ok(())
}
