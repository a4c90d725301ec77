use prorata_web::{ProrataConfig, app, tracing_setup::init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting prorata maintenance calculator");

    let config = ProrataConfig::load()?.apply_profile();
    let host = config.server.host.clone();
    let port = config.server.port;
    let app = app(config)?;

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
