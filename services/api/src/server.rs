use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_freebie_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use freebie_calendar::clock::SystemClock;
use freebie_calendar::config::AppConfig;
use freebie_calendar::error::AppError;
use freebie_calendar::telemetry;
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

    let catalog = load_catalog(&config.catalog, args.catalog.as_deref())?;
    info!(offers = catalog.len(), "catalog ready");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::new(catalog),
        day_overflow: config.catalog.day_overflow,
        clock: Arc::new(SystemClock),
    };

    let app = with_freebie_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "freebie calendar api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
