use fit_track::chart::SvgLineChart;
use fit_track::config::SourceConfig;
use fit_track::source::{CustomerSource, HttpCustomerSource};
use fit_track::storage::FileCustomerSource;
use fit_track::{router, AppState, Config};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let source: Arc<dyn CustomerSource> = match &config.source {
        SourceConfig::Http { base_url } => {
            info!("reading customers from {base_url}");
            Arc::new(HttpCustomerSource::new(base_url))
        }
        SourceConfig::File { path } => {
            let source = FileCustomerSource::new(path.clone());
            info!("reading customers from {}", source.path().display());
            Arc::new(source)
        }
    };

    let state = AppState::new(source, Arc::new(SvgLineChart::default()), config.customer_id);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
