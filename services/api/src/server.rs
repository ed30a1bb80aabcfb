use crate::cli::ServeArgs;
use crate::infra::{shared_session, AppState};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use org_dashboard::config::AppConfig;
use org_dashboard::dashboard::Dataset;
use org_dashboard::error::AppError;
use org_dashboard::telemetry;
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

    let dataset = Dataset::sample()?;
    info!(
        projects = dataset.len(),
        score_min = config.dashboard.score_bounds.min,
        score_max = config.dashboard.score_bounds.max,
        "dataset validated"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let session = shared_session(dataset, config.dashboard.score_bounds);
    let app = with_dashboard_routes(session)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "project dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
