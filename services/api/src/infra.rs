use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use recruitment_map::config::AppConfig;
use recruitment_map::error::AppError;
use recruitment_map::workflows::import::{Dataset, DatasetImporter};
use recruitment_map::workflows::recruitment::{
    Candidate, CandidateId, ExportError, ExportNotifier, ExportedReport, JobEvent, JobPosting,
    JobPublisher, PlatformOutcome, Position, PositionId, PublishError, PublishReceipt,
    PublishRequest, RecruitmentRepository, RecruitmentService, ReportExporter, RepositoryError,
};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

const SAMPLE_POSITIONS: &str = include_str!("../data/sample_positions.csv");
const SAMPLE_CANDIDATES: &str = include_str!("../data/sample_candidates.csv");

pub(crate) type ApiService = RecruitmentService<InMemoryRecruitmentRepository, LoggingJobPublisher>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRecruitmentRepository {
    positions: Arc<Mutex<Vec<Position>>>,
    candidates: Arc<Mutex<Vec<Candidate>>>,
}

impl InMemoryRecruitmentRepository {
    pub(crate) fn from_dataset(dataset: Dataset) -> Self {
        Self {
            positions: Arc::new(Mutex::new(dataset.positions)),
            candidates: Arc::new(Mutex::new(dataset.candidates)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

impl RecruitmentRepository for InMemoryRecruitmentRepository {
    fn list_positions(&self) -> Result<Vec<Position>, RepositoryError> {
        Ok(lock(&self.positions)?.clone())
    }

    fn fetch_position(&self, id: &PositionId) -> Result<Option<Position>, RepositoryError> {
        let guard = lock(&self.positions)?;
        Ok(guard.iter().find(|position| &position.id == id).cloned())
    }

    fn insert_position(&self, position: Position) -> Result<Position, RepositoryError> {
        let mut guard = lock(&self.positions)?;
        if guard.iter().any(|existing| existing.id == position.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(position.clone());
        Ok(position)
    }

    fn update_position(&self, position: Position) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.positions)?;
        match guard.iter_mut().find(|existing| existing.id == position.id) {
            Some(slot) => {
                *slot = position;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn list_candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Ok(lock(&self.candidates)?.clone())
    }

    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = lock(&self.candidates)?;
        Ok(guard.iter().find(|candidate| &candidate.id == id).cloned())
    }

    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.candidates)?;
        match guard.iter_mut().find(|existing| existing.id == candidate.id) {
            Some(slot) => {
                *slot = candidate;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

/// Publisher that records each outbound posting in the log instead of calling job boards.
#[derive(Default, Clone)]
pub(crate) struct LoggingJobPublisher {
    events: Arc<Mutex<Vec<JobEvent>>>,
}

impl LoggingJobPublisher {
    #[cfg(test)]
    pub(crate) fn events(&self) -> Vec<JobEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl JobPublisher for LoggingJobPublisher {
    fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, PublishError> {
        let JobPosting {
            job_title, company, ..
        } = &request.job;

        let platforms = request
            .platforms
            .iter()
            .map(|platform| {
                info!(%platform, job = %job_title, %company, "job posting queued");
                PlatformOutcome {
                    platform: platform.clone(),
                    success: true,
                    error: None,
                }
            })
            .collect();

        let event = JobEvent::job_created(request.job.clone(), Utc::now());
        for url in &request.webhook_urls {
            info!(%url, event = ?event.event, job = %job_title, "webhook notified");
        }

        let mut guard = self
            .events
            .lock()
            .map_err(|_| PublishError::Transport("event log unavailable".to_string()))?;
        guard.push(event);

        Ok(PublishReceipt {
            platforms,
            webhooks_notified: request.webhook_urls.len(),
        })
    }
}

/// Routes export outcomes to the log, standing in for the dashboard toast.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TracingExportNotifier;

impl ExportNotifier for TracingExportNotifier {
    fn export_succeeded(&self, report: &ExportedReport) {
        info!(
            file = %report.file_name,
            rows = report.rows,
            bytes = report.size_bytes,
            "relatório exportado com sucesso"
        );
    }

    fn export_failed(&self, kind: &str, error: &ExportError) {
        warn!(%kind, %error, "erro ao exportar relatório");
    }
}

/// CSV locations for the dataset; with neither set the bundled sample data is used.
#[derive(Debug, Clone, Default)]
pub(crate) struct DataSource {
    pub(crate) positions_csv: Option<PathBuf>,
    pub(crate) candidates_csv: Option<PathBuf>,
}

impl DataSource {
    pub(crate) fn load(&self, now: DateTime<Utc>) -> Result<Dataset, AppError> {
        if self.positions_csv.is_none() && self.candidates_csv.is_none() {
            return sample_dataset(now);
        }

        let dataset = DatasetImporter::from_paths(
            self.positions_csv.as_deref(),
            self.candidates_csv.as_deref(),
            now,
        )?;
        info!(
            positions = dataset.positions.len(),
            candidates = dataset.candidates.len(),
            "dataset imported"
        );
        Ok(dataset)
    }
}

pub(crate) fn sample_dataset(now: DateTime<Utc>) -> Result<Dataset, AppError> {
    Ok(Dataset {
        positions: DatasetImporter::positions_from_reader(Cursor::new(SAMPLE_POSITIONS), now)?,
        candidates: DatasetImporter::candidates_from_reader(Cursor::new(SAMPLE_CANDIDATES))?,
    })
}

pub(crate) fn build_service(config: &AppConfig, dataset: Dataset) -> ApiService {
    let exporter = ReportExporter::new(
        config.reports.output_dir.clone(),
        Arc::new(TracingExportNotifier),
    );

    RecruitmentService::new(
        Arc::new(InMemoryRecruitmentRepository::from_dataset(dataset)),
        Arc::new(LoggingJobPublisher::default()),
        Arc::new(exporter),
        config.publishing.clone(),
    )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    recruitment_map::workflows::import::parse_date(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD"))
}
