use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for job openings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(pub String);

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl PositionStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Open, Self::InProgress, Self::Completed, Self::Cancelled]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn label(self) -> &'static str {
        self.badge().label
    }

    /// Open and in-progress positions still consume recruiter time.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }

    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub const fn badge(self) -> StatusBadge {
        match self {
            Self::Open => StatusBadge {
                label: "Aberta",
                tone: BadgeTone::Neutral,
            },
            Self::InProgress => StatusBadge {
                label: "Em Andamento",
                tone: BadgeTone::Primary,
            },
            Self::Completed => StatusBadge {
                label: "Finalizada",
                tone: BadgeTone::Success,
            },
            Self::Cancelled => StatusBadge {
                label: "Cancelada",
                tone: BadgeTone::Destructive,
            },
        }
    }
}

/// Presentation hint attached to a position status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Neutral,
    Primary,
    Success,
    Destructive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitmentType {
    Internal,
    External,
}

impl RecruitmentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Internal => "Interno",
            Self::External => "Externo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionLevel {
    Strategic,
    Tactical,
    Operational,
}

impl PositionLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strategic => "strategic",
            Self::Tactical => "tactical",
            Self::Operational => "operational",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strategic => "Estratégico",
            Self::Tactical => "Tático",
            Self::Operational => "Operacional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    Clt,
    Internship,
    Temporary,
    Contractor,
}

impl ContractType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clt => "clt",
            Self::Internship => "internship",
            Self::Temporary => "temporary",
            Self::Contractor => "contractor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Replacement,
    HeadcountIncrease,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Internal,
    ExternalConsultant,
    Mixed,
}

/// A job opening tracked from opening through completion or cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub position_code: String,
    pub job_title: String,
    pub department: String,
    pub location: String,
    pub status: PositionStatus,
    pub recruitment_type: RecruitmentType,
    pub position_level: PositionLevel,
    pub contract_type: ContractType,
    pub request_type: RequestType,
    pub service_type: ServiceType,
    #[serde(default)]
    pub salary: Option<f64>,
    pub opening_date: NaiveDate,
    #[serde(default)]
    pub expected_start_date: Option<NaiveDate>,
    pub approver: String,
    pub hr_responsible: String,
    pub manager_responsible: String,
    pub source_of_capture: String,
    pub requirements: String,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub replaced_employee: Option<String>,
    #[serde(default)]
    pub selected_candidate: Option<String>,
    /// Elapsed recruitment days, supplied by the hiring team.
    #[serde(default)]
    pub recruitment_time: Option<u32>,
    /// Days the HR back office spent on admission paperwork.
    #[serde(default)]
    pub hr_process_duration: Option<u32>,
    /// Date the position moved to completed or cancelled.
    #[serde(default)]
    pub closed_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    /// Moves the position to `status`, stamping the closing date when it leaves the active set.
    pub fn transition_status(&mut self, status: PositionStatus, now: DateTime<Utc>) {
        self.closed_on = if status.is_closed() {
            self.closed_on
                .filter(|_| self.status == status)
                .or(Some(now.date_naive()))
        } else {
            None
        };
        self.status = status;
        self.updated_at = now;
    }

    /// Closing date used by the monthly timeline.
    pub fn closing_date(&self) -> Option<NaiveDate> {
        if !self.status.is_closed() {
            return None;
        }
        self.closed_on.or(Some(self.updated_at.date_naive()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Linkedin,
    Website,
    Referral,
    Agency,
    Other,
}

impl CandidateSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin",
            Self::Website => "website",
            Self::Referral => "referral",
            Self::Agency => "agency",
            Self::Other => "other",
        }
    }
}

/// Labeled step of the candidate pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStage {
    Applied,
    Screening,
    PhoneInterview,
    TechnicalTest,
    InPersonInterview,
    FinalInterview,
    OfferMade,
    Hired,
    Rejected,
}

impl CandidateStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Screening => "screening",
            Self::PhoneInterview => "phone_interview",
            Self::TechnicalTest => "technical_test",
            Self::InPersonInterview => "in_person_interview",
            Self::FinalInterview => "final_interview",
            Self::OfferMade => "offer_made",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Phone,
    Video,
    InPerson,
    Technical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: String,
    pub interview_type: InterviewType,
    pub stage: CandidateStage,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub interviewer: String,
    pub status: InterviewStatus,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub score: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Resume,
    CoverLetter,
    Portfolio,
    Certificate,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub document_type: DocumentType,
    pub name: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Person applying to exactly one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub position_id: PositionId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub resume_url: Option<String>,
    pub source: CandidateSource,
    pub current_stage: CandidateStage,
    /// Recruiter score on a 0-10 scale.
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub notes: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub interviews: Vec<Interview>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecruitmentError {
    #[error("candidate {0} not found")]
    UnknownCandidate(CandidateId),
    #[error("position {0} not found")]
    UnknownPosition(PositionId),
}
