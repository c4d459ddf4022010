mod aggregator;
pub mod views;

pub use aggregator::MetricsAggregator;
pub use views::{
    CandidateMetrics, DashboardMetrics, DepartmentCount, SourceCount, StageCount, StatusCount,
    TimelineEntry,
};
