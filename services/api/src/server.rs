use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryListingSink, InMemorySessionStore};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use saledirect::catalog::{SampleCatalog, SearchEngine};
use saledirect::config::AppConfig;
use saledirect::error::AppError;
use saledirect::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = Arc::new(SampleCatalog::with_delay(config.search.simulated_delay));
    let engine = Arc::new(SearchEngine::new(source));
    let store = Arc::new(InMemorySessionStore::default());
    let sink = Arc::new(InMemoryListingSink::default());

    let app = with_marketplace_routes(engine, store, sink)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "saledirect marketplace backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
