use super::super::domain::{Candidate, CandidateId, CandidateStage, PositionId, RecruitmentError};
use super::stages::StageRegistry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Emitted whenever a candidate changes stage so metric caches can be invalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTransition {
    pub candidate_id: CandidateId,
    pub position_id: PositionId,
    pub from: CandidateStage,
    pub to: CandidateStage,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMove {
    pub candidate: Candidate,
    pub transition: StageTransition,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunnelError {
    #[error(transparent)]
    Lookup(#[from] RecruitmentError),
    #[error("candidate {candidate} has no stage after {}", .stage.as_str())]
    NoNextStage {
        candidate: CandidateId,
        stage: CandidateStage,
    },
}

/// Funnel column as rendered on a position board.
#[derive(Debug, Clone, Serialize)]
pub struct StageColumn {
    pub stage: CandidateStage,
    pub stage_label: &'static str,
    pub order: Option<u8>,
    pub count: usize,
    pub candidates: Vec<Candidate>,
}

/// Candidate arena indexed by id.
///
/// Stages form a labeled set rather than a pipeline: `move_candidate` accepts any
/// target, including regressions and `rejected`. `advance_candidate` is only a
/// shortcut to the next ordered stage.
#[derive(Debug, Default)]
pub struct FunnelEngine {
    candidates: Vec<Candidate>,
    index: HashMap<CandidateId, usize>,
    transitions: Vec<StageTransition>,
}

impl FunnelEngine {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut index = HashMap::with_capacity(candidates.len());
        for (slot, candidate) in candidates.iter().enumerate() {
            index.entry(candidate.id.clone()).or_insert(slot);
        }

        Self {
            candidates,
            index,
            transitions: Vec::new(),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.index.get(id).map(|slot| &self.candidates[*slot])
    }

    /// Candidates applied to `position_id`, in insertion order.
    pub fn candidates_for_position(&self, position_id: &PositionId) -> Vec<&Candidate> {
        self.candidates
            .iter()
            .filter(|candidate| &candidate.position_id == position_id)
            .collect()
    }

    pub fn by_stage<'a>(candidates: &[&'a Candidate], stage: CandidateStage) -> Vec<&'a Candidate> {
        candidates
            .iter()
            .copied()
            .filter(|candidate| candidate.current_stage == stage)
            .collect()
    }

    /// One column per registry stage, `rejected` last.
    pub fn board(&self, position_id: &PositionId) -> Vec<StageColumn> {
        let position_candidates = self.candidates_for_position(position_id);
        StageRegistry::all()
            .map(|stage| {
                let candidates: Vec<Candidate> = Self::by_stage(&position_candidates, stage.id)
                    .into_iter()
                    .cloned()
                    .collect();
                StageColumn {
                    stage: stage.id,
                    stage_label: stage.name,
                    order: stage.order,
                    count: candidates.len(),
                    candidates,
                }
            })
            .collect()
    }

    pub fn move_candidate(
        &mut self,
        id: &CandidateId,
        target: CandidateStage,
        now: DateTime<Utc>,
    ) -> Result<CandidateMove, FunnelError> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| RecruitmentError::UnknownCandidate(id.clone()))?;

        let candidate = &mut self.candidates[slot];
        let from = candidate.current_stage;
        candidate.current_stage = target;
        candidate.last_updated = now;

        let transition = StageTransition {
            candidate_id: candidate.id.clone(),
            position_id: candidate.position_id.clone(),
            from,
            to: target,
            at: now,
        };
        debug!(
            candidate = %transition.candidate_id,
            from = from.as_str(),
            to = target.as_str(),
            "candidate moved"
        );

        let moved = CandidateMove {
            candidate: candidate.clone(),
            transition: transition.clone(),
        };
        self.transitions.push(transition);
        Ok(moved)
    }

    pub fn advance_candidate(
        &mut self,
        id: &CandidateId,
        now: DateTime<Utc>,
    ) -> Result<CandidateMove, FunnelError> {
        let current = self
            .candidate(id)
            .ok_or_else(|| RecruitmentError::UnknownCandidate(id.clone()))?
            .current_stage;

        let next = StageRegistry::stage_after(current).ok_or_else(|| FunnelError::NoNextStage {
            candidate: id.clone(),
            stage: current,
        })?;

        self.move_candidate(id, next.id, now)
    }

    pub fn transitions(&self) -> &[StageTransition] {
        &self.transitions
    }
}
