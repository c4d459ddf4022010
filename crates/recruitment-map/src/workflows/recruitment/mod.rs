//! Position lifecycle, candidate funnel, dashboard metrics, and report export.

pub mod domain;
pub mod filter;
pub(crate) mod format;
pub mod funnel;
pub mod intake;
pub mod metrics;
pub mod publishing;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BadgeTone, Candidate, CandidateId, CandidateSource, CandidateStage, ContractType, Document,
    DocumentType, Interview, InterviewStatus, InterviewType, Position, PositionId, PositionLevel,
    PositionStatus, RecruitmentError, RecruitmentType, RequestType, ServiceType, StatusBadge,
};
pub use filter::{CandidateFilter, DateRange, FilterOptions, PositionFilter};
pub use funnel::{
    CandidateMove, FunnelEngine, FunnelError, FunnelStage, StageColumn, StageRegistry,
    StageTransition,
};
pub use intake::{IntakeViolation, PositionDraft};
pub use metrics::{
    CandidateMetrics, DashboardMetrics, DepartmentCount, MetricsAggregator, SourceCount,
    StageCount, StatusCount, TimelineEntry,
};
pub use publishing::{
    JobEvent, JobEventKind, JobPosting, JobPublisher, PlatformOutcome, PublishError,
    PublishReceipt, PublishRequest, PublishTargets,
};
pub use report::{
    Cell, ExportError, ExportNotifier, ExportRequest, ExportedReport, ReportExporter,
    ReportFormat, ReportKind, ReportSnapshot, ReportTable,
};
pub use repository::{RecruitmentRepository, RepositoryError};
pub use router::recruitment_router;
pub use service::{DashboardView, PositionFunnel, RecruitmentService, ServiceError};
