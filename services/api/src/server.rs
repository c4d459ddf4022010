use crate::cli::ServeArgs;
use crate::infra::{build_service, AppState};
use crate::routes::with_recruitment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use recruitment_map::config::AppConfig;
use recruitment_map::error::AppError;
use recruitment_map::telemetry;
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
    if let Some(output_dir) = args.output_dir.take() {
        config.reports.output_dir = output_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dataset = args.data.source().load(Utc::now())?;
    let service = Arc::new(build_service(&config, dataset));

    let app = with_recruitment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        reports = %config.reports.output_dir.display(),
        "recruitment dashboard api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
