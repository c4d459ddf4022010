//! Predicate compilation for the position and candidate lists.

use super::domain::{
    Candidate, CandidateSource, CandidateStage, Position, PositionLevel, PositionStatus,
    RecruitmentType,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive bounds on a position's opening date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Multi-select criteria; an empty list places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub departments: Vec<String>,
    pub status: Vec<PositionStatus>,
    pub recruitment_type: Vec<RecruitmentType>,
    pub position_level: Vec<PositionLevel>,
    pub date_range: DateRange,
}

impl FilterOptions {
    pub fn has_active_filters(&self) -> bool {
        !self.departments.is_empty()
            || !self.status.is_empty()
            || !self.recruitment_type.is_empty()
            || !self.position_level.is_empty()
            || !self.date_range.is_unbounded()
    }
}

#[derive(Debug, Clone)]
enum PositionPredicate {
    Search(String),
    Status(Vec<PositionStatus>),
    RecruitmentType(Vec<RecruitmentType>),
    PositionLevel(Vec<PositionLevel>),
    Department(Vec<String>),
    OpenedWithin(DateRange),
}

impl PositionPredicate {
    fn matches(&self, position: &Position) -> bool {
        match self {
            Self::Search(needle) => [
                &position.job_title,
                &position.position_code,
                &position.department,
            ]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle.as_str())),
            Self::Status(allowed) => allowed.contains(&position.status),
            Self::RecruitmentType(allowed) => allowed.contains(&position.recruitment_type),
            Self::PositionLevel(allowed) => allowed.contains(&position.position_level),
            Self::Department(allowed) => allowed.iter().any(|dept| dept == &position.department),
            Self::OpenedWithin(range) => range.contains(position.opening_date),
        }
    }
}

/// Conjunction of the search term and every active [`FilterOptions`] criterion.
///
/// Criteria with no restriction are dropped at compile time, so an empty
/// filter holds no predicates and matches everything.
#[derive(Debug, Clone, Default)]
pub struct PositionFilter {
    predicates: Vec<PositionPredicate>,
}

impl PositionFilter {
    pub fn compile(options: &FilterOptions, search: &str) -> Self {
        let mut predicates = Vec::new();

        if !search.is_empty() {
            predicates.push(PositionPredicate::Search(search.to_lowercase()));
        }
        if !options.status.is_empty() {
            predicates.push(PositionPredicate::Status(options.status.clone()));
        }
        if !options.recruitment_type.is_empty() {
            predicates.push(PositionPredicate::RecruitmentType(
                options.recruitment_type.clone(),
            ));
        }
        if !options.position_level.is_empty() {
            predicates.push(PositionPredicate::PositionLevel(
                options.position_level.clone(),
            ));
        }
        if !options.departments.is_empty() {
            predicates.push(PositionPredicate::Department(options.departments.clone()));
        }
        if !options.date_range.is_unbounded() {
            predicates.push(PositionPredicate::OpenedWithin(options.date_range));
        }

        Self { predicates }
    }

    pub fn is_identity(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, position: &Position) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(position))
    }

    pub fn apply<'a>(&self, positions: &'a [Position]) -> Vec<&'a Position> {
        positions
            .iter()
            .filter(|position| self.matches(position))
            .collect()
    }
}

/// Candidate list narrowing: free text over name and email, plus stage and source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilter {
    pub search: String,
    pub stage: Option<CandidateStage>,
    pub source: Option<CandidateSource>,
}

impl CandidateFilter {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let needle = self.search.to_lowercase();
        let search_match = candidate.name.to_lowercase().contains(&needle)
            || candidate.email.to_lowercase().contains(&needle);

        search_match
            && self
                .stage
                .map_or(true, |stage| candidate.current_stage == stage)
            && self.source.map_or(true, |source| candidate.source == source)
    }

    pub fn apply<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        candidates
            .iter()
            .filter(|candidate| self.matches(candidate))
            .collect()
    }
}
