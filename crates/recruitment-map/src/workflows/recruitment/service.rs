use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    Candidate, CandidateId, CandidateStage, Position, PositionId, PositionStatus,
    RecruitmentError,
};
use super::filter::{CandidateFilter, FilterOptions, PositionFilter};
use super::funnel::{CandidateMove, FunnelEngine, FunnelError, StageColumn};
use super::intake::{IntakeViolation, PositionDraft};
use super::metrics::{CandidateMetrics, DashboardMetrics, MetricsAggregator};
use super::publishing::{JobPublisher, PublishTargets};
use super::report::{ExportError, ExportRequest, ExportedReport, ReportExporter, ReportSnapshot};
use super::repository::{RecruitmentRepository, RepositoryError};

/// Service composing storage, the funnel, filtering, metrics, export, and job publication.
pub struct RecruitmentService<R, P> {
    repository: Arc<R>,
    publisher: Arc<P>,
    exporter: Arc<ReportExporter>,
    targets: PublishTargets,
}

static POSITION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_position_id() -> PositionId {
    let id = POSITION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PositionId(format!("pos-{id:06}"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub has_active_filters: bool,
    pub metrics: DashboardMetrics,
    pub candidates: CandidateMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionFunnel {
    pub position: Position,
    pub columns: Vec<StageColumn>,
}

impl<R, P> RecruitmentService<R, P>
where
    R: RecruitmentRepository + 'static,
    P: JobPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        publisher: Arc<P>,
        exporter: Arc<ReportExporter>,
        targets: PublishTargets,
    ) -> Self {
        Self {
            repository,
            publisher,
            exporter,
            targets,
        }
    }

    pub fn exporter(&self) -> &ReportExporter {
        &self.exporter
    }

    /// Validates and stores a new open position, then hands it to the publisher.
    ///
    /// Publication failures are logged and never undo the creation.
    pub fn create_position(
        &self,
        draft: PositionDraft,
        now: DateTime<Utc>,
    ) -> Result<Position, ServiceError> {
        let position = draft.into_position(next_position_id(), now)?;
        let stored = self.repository.insert_position(position)?;
        info!(
            position = %stored.id,
            code = %stored.position_code,
            department = %stored.department,
            "position created"
        );

        let request = self.targets.request_for(&stored);
        match self.publisher.publish(&request) {
            Ok(receipt) => {
                let failed = receipt
                    .platforms
                    .iter()
                    .filter(|outcome| !outcome.success)
                    .count();
                info!(
                    position = %stored.id,
                    platforms = receipt.platforms.len(),
                    failed,
                    webhooks = receipt.webhooks_notified,
                    "job posting published"
                );
            }
            Err(error) => {
                warn!(position = %stored.id, %error, "job posting could not be published");
            }
        }

        Ok(stored)
    }

    pub fn update_position(
        &self,
        id: &PositionId,
        draft: PositionDraft,
        now: DateTime<Utc>,
    ) -> Result<Position, ServiceError> {
        let mut position = self.position(id)?;
        draft.apply_to(&mut position, now)?;
        self.repository.update_position(position.clone())?;
        Ok(position)
    }

    pub fn update_position_status(
        &self,
        id: &PositionId,
        status: PositionStatus,
        now: DateTime<Utc>,
    ) -> Result<Position, ServiceError> {
        let mut position = self.position(id)?;
        let previous = position.status;
        position.transition_status(status, now);
        self.repository.update_position(position.clone())?;
        info!(
            position = %position.id,
            from = previous.as_str(),
            to = status.as_str(),
            "position status changed"
        );
        Ok(position)
    }

    pub fn position(&self, id: &PositionId) -> Result<Position, ServiceError> {
        self.repository
            .fetch_position(id)?
            .ok_or_else(|| RecruitmentError::UnknownPosition(id.clone()).into())
    }

    /// Positions passing `options` and `search`, in storage order.
    pub fn positions(
        &self,
        options: &FilterOptions,
        search: &str,
    ) -> Result<Vec<Position>, ServiceError> {
        let filter = PositionFilter::compile(options, search);
        let mut positions = self.repository.list_positions()?;
        positions.retain(|position| filter.matches(position));
        Ok(positions)
    }

    pub fn candidates(
        &self,
        position_id: Option<&PositionId>,
        filter: &CandidateFilter,
    ) -> Result<Vec<Candidate>, ServiceError> {
        let mut candidates = self.repository.list_candidates()?;
        candidates.retain(|candidate| {
            position_id.map_or(true, |id| &candidate.position_id == id) && filter.matches(candidate)
        });
        Ok(candidates)
    }

    /// KPIs over the filtered positions. Candidate metrics follow the same position filter.
    pub fn dashboard(
        &self,
        options: &FilterOptions,
        search: &str,
        today: NaiveDate,
    ) -> Result<DashboardView, ServiceError> {
        let (positions, candidates) = self.filtered_dataset(options, search)?;
        Ok(DashboardView {
            has_active_filters: options.has_active_filters() || !search.is_empty(),
            metrics: MetricsAggregator::dashboard(&positions, today),
            candidates: MetricsAggregator::candidates(&candidates),
        })
    }

    pub fn funnel(&self, position_id: &PositionId) -> Result<PositionFunnel, ServiceError> {
        let position = self.position(position_id)?;
        let engine = FunnelEngine::new(self.repository.list_candidates()?);
        Ok(PositionFunnel {
            columns: engine.board(position_id),
            position,
        })
    }

    /// Moves a candidate to any stage. Reaching `hired` completes the position.
    pub fn move_candidate(
        &self,
        id: &CandidateId,
        target: CandidateStage,
        now: DateTime<Utc>,
    ) -> Result<CandidateMove, ServiceError> {
        let mut engine = self.engine_for(id)?;
        let moved = engine.move_candidate(id, target, now)?;
        self.persist_move(&moved, now)?;
        Ok(moved)
    }

    pub fn advance_candidate(
        &self,
        id: &CandidateId,
        now: DateTime<Utc>,
    ) -> Result<CandidateMove, ServiceError> {
        let mut engine = self.engine_for(id)?;
        let moved = engine.advance_candidate(id, now)?;
        self.persist_move(&moved, now)?;
        Ok(moved)
    }

    /// Exports the filtered dataset; `now` stamps both the file name and the document header.
    pub async fn export_report(
        &self,
        request: ExportRequest,
        options: &FilterOptions,
        search: &str,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<ExportedReport, ServiceError> {
        let snapshot = self.snapshot(options, search, today)?;
        Ok(self.exporter.export(snapshot, request, now).await?)
    }

    /// Positions and metrics follow the filter; the candidate list is always complete.
    pub fn snapshot(
        &self,
        options: &FilterOptions,
        search: &str,
        today: NaiveDate,
    ) -> Result<ReportSnapshot, ServiceError> {
        let filter = PositionFilter::compile(options, search);
        let mut positions = self.repository.list_positions()?;
        positions.retain(|position| filter.matches(position));
        let candidates = self.repository.list_candidates()?;
        let metrics = MetricsAggregator::dashboard(&positions, today);
        Ok(ReportSnapshot {
            positions,
            candidates,
            metrics,
        })
    }

    fn filtered_dataset(
        &self,
        options: &FilterOptions,
        search: &str,
    ) -> Result<(Vec<Position>, Vec<Candidate>), ServiceError> {
        let filter = PositionFilter::compile(options, search);
        let mut positions = self.repository.list_positions()?;
        let mut candidates = self.repository.list_candidates()?;
        if filter.is_identity() {
            return Ok((positions, candidates));
        }

        positions.retain(|position| filter.matches(position));
        let kept: HashSet<&PositionId> = positions.iter().map(|position| &position.id).collect();
        candidates.retain(|candidate| kept.contains(&candidate.position_id));
        Ok((positions, candidates))
    }

    fn engine_for(&self, id: &CandidateId) -> Result<FunnelEngine, ServiceError> {
        let candidate = self
            .repository
            .fetch_candidate(id)?
            .ok_or_else(|| RecruitmentError::UnknownCandidate(id.clone()))?;
        Ok(FunnelEngine::new(vec![candidate]))
    }

    fn persist_move(&self, moved: &CandidateMove, now: DateTime<Utc>) -> Result<(), ServiceError> {
        self.repository.update_candidate(moved.candidate.clone())?;

        if moved.transition.to != CandidateStage::Hired {
            return Ok(());
        }

        match self.repository.fetch_position(&moved.candidate.position_id)? {
            Some(mut position) => {
                position.selected_candidate = Some(moved.candidate.name.clone());
                position.transition_status(PositionStatus::Completed, now);
                self.repository.update_position(position)?;
                info!(
                    position = %moved.candidate.position_id,
                    candidate = %moved.candidate.id,
                    "position completed by hire"
                );
            }
            None => {
                warn!(
                    position = %moved.candidate.position_id,
                    candidate = %moved.candidate.id,
                    "hired candidate references an unknown position"
                );
            }
        }
        Ok(())
    }
}

/// Error raised by the recruitment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Lookup(#[from] RecruitmentError),
    #[error(transparent)]
    Funnel(#[from] FunnelError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
