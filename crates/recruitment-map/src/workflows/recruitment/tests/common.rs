use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::recruitment::domain::{
    Candidate, CandidateId, CandidateSource, CandidateStage, ContractType, Position, PositionId,
    PositionLevel, PositionStatus, RecruitmentType, RequestType, ServiceType,
};
use crate::workflows::recruitment::intake::PositionDraft;
use crate::workflows::recruitment::publishing::{
    JobPublisher, PlatformOutcome, PublishError, PublishReceipt, PublishRequest, PublishTargets,
};
use crate::workflows::recruitment::report::{ExportError, ExportNotifier, ExportedReport, ReportExporter};
use crate::workflows::recruitment::repository::{RecruitmentRepository, RepositoryError};
use crate::workflows::recruitment::service::RecruitmentService;

pub(crate) fn timestamp(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid date")
}

fn status_from(raw: &str) -> PositionStatus {
    serde_json::from_value(Value::String(raw.to_string())).expect("known status")
}

pub(crate) fn position(id: &str, status: &str) -> Position {
    Position {
        id: PositionId(id.to_string()),
        position_code: format!("TI-{id}"),
        job_title: "Analista de Dados".to_string(),
        department: "Tecnologia".to_string(),
        location: "Recife".to_string(),
        status: status_from(status),
        recruitment_type: RecruitmentType::External,
        position_level: PositionLevel::Tactical,
        contract_type: ContractType::Clt,
        request_type: RequestType::HeadcountIncrease,
        service_type: ServiceType::Internal,
        salary: Some(6200.0),
        opening_date: date(5, 4),
        expected_start_date: None,
        approver: "Diretoria".to_string(),
        hr_responsible: "Ana Lima".to_string(),
        manager_responsible: "Bruno Rocha".to_string(),
        source_of_capture: "LinkedIn".to_string(),
        requirements: "SQL avançado\nPython".to_string(),
        benefits: Some("Plano de saúde".to_string()),
        observations: None,
        replaced_employee: None,
        selected_candidate: None,
        recruitment_time: None,
        hr_process_duration: None,
        closed_on: None,
        created_at: timestamp(5, 4),
        updated_at: timestamp(5, 4),
    }
}

pub(crate) fn position_in(
    id: &str,
    department: &str,
    status: PositionStatus,
    opening_date: NaiveDate,
) -> Position {
    let mut position = position(id, status.as_str());
    position.department = department.to_string();
    position.opening_date = opening_date;
    position
}

pub(crate) fn candidate(id: &str, position_id: &str, stage: CandidateStage) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        position_id: PositionId(position_id.to_string()),
        name: format!("Pessoa {id}"),
        email: format!("{id}@example.com"),
        phone: "(81) 99999-0000".to_string(),
        resume_url: None,
        source: CandidateSource::Linkedin,
        current_stage: stage,
        score: Some(7.5),
        notes: None,
        applied_at: timestamp(5, 6),
        last_updated: timestamp(5, 6),
        interviews: Vec::new(),
        documents: Vec::new(),
    }
}

pub(crate) fn draft() -> PositionDraft {
    PositionDraft {
        job_title: "Engenheiro Eletricista".to_string(),
        position_code: "ENG-042".to_string(),
        department: "Engenharia".to_string(),
        contract_type: ContractType::Clt,
        salary: Some(9800.0),
        position_level: PositionLevel::Tactical,
        recruitment_type: RecruitmentType::External,
        request_type: RequestType::HeadcountIncrease,
        location: "Recife".to_string(),
        source_of_capture: "LinkedIn".to_string(),
        approver: "Diretoria".to_string(),
        hr_responsible: "Ana Lima".to_string(),
        manager_responsible: "Carla Dias".to_string(),
        opening_date: date(6, 1),
        expected_start_date: Some(date(7, 1)),
        replaced_employee: None,
        benefits: Some("Plano de saúde\nVale refeição".to_string()),
        requirements: "CREA ativo e experiência com usinas fotovoltaicas".to_string(),
        service_type: ServiceType::Internal,
        observations: None,
    }
}

pub(crate) struct ServiceHarness {
    pub(crate) service: RecruitmentService<MemoryRepository, MemoryPublisher>,
    pub(crate) repository: Arc<MemoryRepository>,
    pub(crate) publisher: Arc<MemoryPublisher>,
    pub(crate) notifier: Arc<RecordingNotifier>,
}

pub(crate) fn build_service(output_dir: &Path) -> ServiceHarness {
    build_service_with(output_dir, MemoryRepository::default(), MemoryPublisher::default())
}

pub(crate) fn build_service_with(
    output_dir: &Path,
    repository: MemoryRepository,
    publisher: MemoryPublisher,
) -> ServiceHarness {
    let repository = Arc::new(repository);
    let publisher = Arc::new(publisher);
    let notifier = Arc::new(RecordingNotifier::default());
    let exporter = Arc::new(ReportExporter::new(output_dir, notifier.clone()));
    let service = RecruitmentService::new(
        repository.clone(),
        publisher.clone(),
        exporter,
        PublishTargets {
            company: "Resolve Energia Solar".to_string(),
            platforms: vec!["linkedin".to_string(), "indeed".to_string()],
            webhook_urls: vec!["https://hooks.example.com/jobs".to_string()],
        },
    );

    ServiceHarness {
        service,
        repository,
        publisher,
        notifier,
    }
}

#[derive(Default)]
pub(crate) struct MemoryRepository {
    pub(crate) positions: Mutex<Vec<Position>>,
    pub(crate) candidates: Mutex<Vec<Candidate>>,
}

impl MemoryRepository {
    pub(crate) fn seeded(positions: Vec<Position>, candidates: Vec<Candidate>) -> Self {
        Self {
            positions: Mutex::new(positions),
            candidates: Mutex::new(candidates),
        }
    }

    pub(crate) fn stored_position(&self, id: &str) -> Position {
        self.positions
            .lock()
            .expect("repository mutex poisoned")
            .iter()
            .find(|position| position.id.0 == id)
            .cloned()
            .expect("position stored")
    }

    pub(crate) fn stored_candidate(&self, id: &str) -> Candidate {
        self.candidates
            .lock()
            .expect("repository mutex poisoned")
            .iter()
            .find(|candidate| candidate.id.0 == id)
            .cloned()
            .expect("candidate stored")
    }
}

impl RecruitmentRepository for MemoryRepository {
    fn list_positions(&self) -> Result<Vec<Position>, RepositoryError> {
        Ok(self.positions.lock().expect("repository mutex poisoned").clone())
    }

    fn fetch_position(&self, id: &PositionId) -> Result<Option<Position>, RepositoryError> {
        let guard = self.positions.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|position| &position.id == id).cloned())
    }

    fn insert_position(&self, position: Position) -> Result<Position, RepositoryError> {
        let mut guard = self.positions.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == position.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(position.clone());
        Ok(position)
    }

    fn update_position(&self, position: Position) -> Result<(), RepositoryError> {
        let mut guard = self.positions.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == position.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = position;
        Ok(())
    }

    fn list_candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Ok(self.candidates.lock().expect("repository mutex poisoned").clone())
    }

    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.candidates.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|candidate| &candidate.id == id).cloned())
    }

    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut guard = self.candidates.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == candidate.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = candidate;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MemoryPublisher {
    requests: Mutex<Vec<PublishRequest>>,
    failing: bool,
}

impl MemoryPublisher {
    pub(crate) fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub(crate) fn requests(&self) -> Vec<PublishRequest> {
        self.requests.lock().expect("publisher mutex poisoned").clone()
    }
}

impl JobPublisher for MemoryPublisher {
    fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, PublishError> {
        self.requests
            .lock()
            .expect("publisher mutex poisoned")
            .push(request.clone());

        if self.failing {
            return Err(PublishError::Transport("connection refused".to_string()));
        }

        Ok(PublishReceipt {
            platforms: request
                .platforms
                .iter()
                .map(|platform| PlatformOutcome {
                    platform: platform.clone(),
                    success: true,
                    error: None,
                })
                .collect(),
            webhooks_notified: request.webhook_urls.len(),
        })
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn successes(&self) -> Vec<String> {
        self.successes.lock().expect("notifier mutex poisoned").clone()
    }

    pub(crate) fn failures(&self) -> Vec<String> {
        self.failures.lock().expect("notifier mutex poisoned").clone()
    }
}

impl ExportNotifier for RecordingNotifier {
    fn export_succeeded(&self, report: &ExportedReport) {
        self.successes
            .lock()
            .expect("notifier mutex poisoned")
            .push(report.file_name.clone());
    }

    fn export_failed(&self, kind: &str, error: &ExportError) {
        self.failures
            .lock()
            .expect("notifier mutex poisoned")
            .push(format!("{kind}: {error}"));
    }
}

pub(crate) async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(crate) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
