use super::super::domain::{CandidateSource, CandidateStage, PositionStatus};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: PositionStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Calendar month as `YYYY-MM`.
    pub month: String,
    pub opened: usize,
    pub closed: usize,
}

/// Dashboard KPIs, recomputed from the full dataset on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_positions: usize,
    pub active_positions: usize,
    pub completed_positions: usize,
    /// Whole days.
    pub avg_recruitment_time: u32,
    /// Whole days.
    pub avg_hr_time: u32,
    /// Percentage with one decimal.
    pub conversion_rate: f64,
    pub positions_by_department: Vec<DepartmentCount>,
    pub positions_by_status: Vec<StatusCount>,
    pub timeline_data: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: CandidateStage,
    pub stage_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub source: CandidateSource,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateMetrics {
    pub total_candidates: usize,
    pub candidates_by_stage: Vec<StageCount>,
    pub top_sources: Vec<SourceCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
}
