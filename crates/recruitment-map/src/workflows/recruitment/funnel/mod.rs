mod engine;
mod stages;

pub use engine::{CandidateMove, FunnelEngine, FunnelError, StageColumn, StageTransition};
pub use stages::{FunnelStage, StageRegistry};
