use anyhow::Context;
use fibspiral_server::{ServerConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("could not bind {}", config.addr()))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        index = %config.index_path.display(),
        "server running"
    );
    axum::serve(listener, app(&config)).await?;
    Ok(())
}
