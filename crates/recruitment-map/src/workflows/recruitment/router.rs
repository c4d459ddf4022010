use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::de::value::StrDeserializer;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateId, CandidateSource, CandidateStage, PositionId, PositionStatus};
use super::filter::{CandidateFilter, DateRange, FilterOptions};
use super::funnel::FunnelError;
use super::intake::PositionDraft;
use super::publishing::JobPublisher;
use super::report::{ExportError, ExportRequest, ReportFormat, ReportKind};
use super::repository::{RecruitmentRepository, RepositoryError};
use super::service::{RecruitmentService, ServiceError};

/// Router exposing positions, the candidate funnel, dashboard KPIs, and report export.
pub fn recruitment_router<R, P>(service: Arc<RecruitmentService<R, P>>) -> Router
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(dashboard_handler::<R, P>))
        .route(
            "/api/v1/positions",
            get(list_positions_handler::<R, P>).post(create_position_handler::<R, P>),
        )
        .route(
            "/api/v1/positions/:position_id",
            get(position_handler::<R, P>).put(update_position_handler::<R, P>),
        )
        .route(
            "/api/v1/positions/:position_id/status",
            post(position_status_handler::<R, P>),
        )
        .route(
            "/api/v1/positions/:position_id/funnel",
            get(funnel_handler::<R, P>),
        )
        .route("/api/v1/candidates", get(list_candidates_handler::<R, P>))
        .route(
            "/api/v1/candidates/:candidate_id/move",
            post(move_candidate_handler::<R, P>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/advance",
            post(advance_candidate_handler::<R, P>),
        )
        .route("/api/v1/reports/status", get(export_status_handler::<R, P>))
        .route("/api/v1/reports/:kind", get(export_handler::<R, P>))
        .with_state(service)
}

/// Query-string form of [`FilterOptions`]; multi-select values are comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PositionQuery {
    pub search: String,
    pub departments: Option<String>,
    pub status: Option<String>,
    pub recruitment_type: Option<String>,
    pub position_level: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub today: Option<NaiveDate>,
    pub format: Option<String>,
}

impl PositionQuery {
    pub fn filter_options(&self) -> Result<FilterOptions, String> {
        Ok(FilterOptions {
            departments: split_list(self.departments.as_deref())
                .map(str::to_string)
                .collect(),
            status: parse_list(self.status.as_deref())?,
            recruitment_type: parse_list(self.recruitment_type.as_deref())?,
            position_level: parse_list(self.position_level.as_deref())?,
            date_range: DateRange {
                start: self.start,
                end: self.end,
            },
        })
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn parse_list<T: DeserializeOwned>(raw: Option<&str>) -> Result<Vec<T>, String> {
    split_list(raw)
        .map(|token| {
            let deserializer: StrDeserializer<'_, serde::de::value::Error> =
                token.into_deserializer();
            T::deserialize(deserializer).map_err(|_| format!("unrecognized filter value `{token}`"))
        })
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidateQuery {
    pub position_id: Option<String>,
    pub search: String,
    pub stage: Option<CandidateStage>,
    pub source: Option<CandidateSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveCandidateBody {
    pub stage: CandidateStage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionStatusBody {
    pub status: PositionStatus,
}

pub(crate) async fn dashboard_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Query(query): Query<PositionQuery>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    let options = match query.filter_options() {
        Ok(options) => options,
        Err(message) => return bad_request(message),
    };

    match service.dashboard(&options, &query.search, query.today()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_positions_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Query(query): Query<PositionQuery>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    let options = match query.filter_options() {
        Ok(options) => options,
        Err(message) => return bad_request(message),
    };

    match service.positions(&options, &query.search) {
        Ok(positions) => (StatusCode::OK, axum::Json(positions)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_position_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    axum::Json(draft): axum::Json<PositionDraft>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    match service.create_position(draft, Utc::now()) {
        Ok(position) => (StatusCode::CREATED, axum::Json(position)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn position_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Path(position_id): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    match service.position(&PositionId(position_id)) {
        Ok(position) => (StatusCode::OK, axum::Json(position)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_position_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Path(position_id): Path<String>,
    axum::Json(draft): axum::Json<PositionDraft>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    match service.update_position(&PositionId(position_id), draft, Utc::now()) {
        Ok(position) => (StatusCode::OK, axum::Json(position)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn position_status_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Path(position_id): Path<String>,
    axum::Json(body): axum::Json<PositionStatusBody>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    match service.update_position_status(&PositionId(position_id), body.status, Utc::now()) {
        Ok(position) => (StatusCode::OK, axum::Json(position)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn funnel_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Path(position_id): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    match service.funnel(&PositionId(position_id)) {
        Ok(funnel) => (StatusCode::OK, axum::Json(funnel)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_candidates_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Query(query): Query<CandidateQuery>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    let position_id = query.position_id.map(PositionId);
    let filter = CandidateFilter {
        search: query.search,
        stage: query.stage,
        source: query.source,
    };

    match service.candidates(position_id.as_ref(), &filter) {
        Ok(candidates) => (StatusCode::OK, axum::Json(candidates)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn move_candidate_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Path(candidate_id): Path<String>,
    axum::Json(body): axum::Json<MoveCandidateBody>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    match service.move_candidate(&CandidateId(candidate_id), body.stage, Utc::now()) {
        Ok(moved) => (StatusCode::OK, axum::Json(moved.transition)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn advance_candidate_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    match service.advance_candidate(&CandidateId(candidate_id), Utc::now()) {
        Ok(moved) => (StatusCode::OK, axum::Json(moved.transition)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_status_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    let payload = json!({ "exporting": service.exporter().is_exporting() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn export_handler<R, P>(
    State(service): State<Arc<RecruitmentService<R, P>>>,
    Path(kind): Path<String>,
    Query(query): Query<PositionQuery>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    let request = match parse_export_request(&kind, query.format.as_deref()) {
        Ok(request) => request,
        Err(error) => return error_response(ServiceError::Export(error)),
    };
    let options = match query.filter_options() {
        Ok(options) => options,
        Err(message) => return bad_request(message),
    };

    match service
        .export_report(request, &options, &query.search, query.today(), Utc::now())
        .await
    {
        Ok(report) => (StatusCode::CREATED, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn parse_export_request(kind: &str, format: Option<&str>) -> Result<ExportRequest, ExportError> {
    Ok(ExportRequest {
        kind: kind.parse::<ReportKind>()?,
        format: format
            .map(str::parse::<ReportFormat>)
            .transpose()?
            .unwrap_or_default(),
    })
}

fn bad_request(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Lookup(_)
        | ServiceError::Funnel(FunnelError::Lookup(_))
        | ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Funnel(FunnelError::NoNextStage { .. })
        | ServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ServiceError::Export(ExportError::UnsupportedKind(_))
        | ServiceError::Export(ExportError::UnsupportedFormat(_)) => StatusCode::BAD_REQUEST,
        ServiceError::Repository(RepositoryError::Unavailable(_)) | ServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
