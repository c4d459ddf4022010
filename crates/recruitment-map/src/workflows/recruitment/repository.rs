use super::domain::{Candidate, CandidateId, Position, PositionId};

/// Storage abstraction so the service can be exercised in isolation.
pub trait RecruitmentRepository: Send + Sync {
    fn list_positions(&self) -> Result<Vec<Position>, RepositoryError>;
    fn fetch_position(&self, id: &PositionId) -> Result<Option<Position>, RepositoryError>;
    fn insert_position(&self, position: Position) -> Result<Position, RepositoryError>;
    fn update_position(&self, position: Position) -> Result<(), RepositoryError>;

    /// Candidates in application order.
    fn list_candidates(&self) -> Result<Vec<Candidate>, RepositoryError>;
    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
