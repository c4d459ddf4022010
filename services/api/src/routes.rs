use crate::infra::{ApiService, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use recruitment_map::workflows::recruitment::recruitment_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_recruitment_routes(service: Arc<ApiService>) -> axum::Router {
    recruitment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{build_service, sample_dataset};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use recruitment_map::config::AppConfig;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn router(ready: bool, output_dir: &std::path::Path) -> axum::Router {
        let mut config = AppConfig::load().expect("default config loads");
        config.reports.output_dir = output_dir.to_path_buf();
        let dataset = sample_dataset(Utc::now()).expect("sample dataset");
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        with_recruitment_routes(Arc::new(build_service(&config, dataset))).layer(Extension(state))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let dir = tempfile::tempdir().expect("temp dir");

        let response = router(false, dir.path())
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = router(true, dir.path())
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn recruitment_routes_are_mounted_with_sample_data() {
        let dir = tempfile::tempdir().expect("temp dir");

        let response = router(true, dir.path())
            .oneshot(
                Request::get("/api/v1/positions?status=completed")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let positions: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(positions.as_array().map(Vec::len), Some(3));
    }
}
