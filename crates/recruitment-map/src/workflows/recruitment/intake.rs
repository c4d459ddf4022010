use super::domain::{
    ContractType, Position, PositionId, PositionLevel, PositionStatus, RecruitmentType,
    RequestType, ServiceType,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const MIN_JOB_TITLE_CHARS: usize = 2;
const MIN_REQUIREMENTS_CHARS: usize = 10;

/// Form payload for creating or editing a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDraft {
    pub job_title: String,
    pub position_code: String,
    pub department: String,
    pub contract_type: ContractType,
    #[serde(default)]
    pub salary: Option<f64>,
    pub position_level: PositionLevel,
    pub recruitment_type: RecruitmentType,
    pub request_type: RequestType,
    pub location: String,
    pub source_of_capture: String,
    pub approver: String,
    pub hr_responsible: String,
    pub manager_responsible: String,
    pub opening_date: NaiveDate,
    #[serde(default)]
    pub expected_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub replaced_employee: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    pub requirements: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("job title must have at least 2 characters")]
    JobTitleTooShort,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("salary must not be negative (found {0})")]
    NegativeSalary(f64),
    #[error("requirements must have at least 10 characters")]
    RequirementsTooShort,
    #[error("expected start date {expected_start} must be after opening date {opening}")]
    StartNotAfterOpening {
        opening: NaiveDate,
        expected_start: NaiveDate,
    },
}

impl PositionDraft {
    /// Returns the first rule the draft breaks.
    pub fn validate(&self) -> Result<(), IntakeViolation> {
        if is_short(&self.job_title, MIN_JOB_TITLE_CHARS) {
            return Err(IntakeViolation::JobTitleTooShort);
        }

        let required = [
            ("position_code", &self.position_code),
            ("department", &self.department),
            ("location", &self.location),
            ("source_of_capture", &self.source_of_capture),
            ("approver", &self.approver),
            ("hr_responsible", &self.hr_responsible),
            ("manager_responsible", &self.manager_responsible),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(IntakeViolation::MissingField(*field));
        }

        if let Some(salary) = self.salary.filter(|salary| *salary < 0.0) {
            return Err(IntakeViolation::NegativeSalary(salary));
        }

        if is_short(&self.requirements, MIN_REQUIREMENTS_CHARS) {
            return Err(IntakeViolation::RequirementsTooShort);
        }

        match self.expected_start_date {
            Some(expected_start) if expected_start <= self.opening_date => {
                Err(IntakeViolation::StartNotAfterOpening {
                    opening: self.opening_date,
                    expected_start,
                })
            }
            _ => Ok(()),
        }
    }

    /// Validates and materializes a new open position.
    pub fn into_position(
        self,
        id: PositionId,
        now: DateTime<Utc>,
    ) -> Result<Position, IntakeViolation> {
        self.validate()?;

        Ok(Position {
            id,
            position_code: self.position_code,
            job_title: self.job_title,
            department: self.department,
            location: self.location,
            status: PositionStatus::Open,
            recruitment_type: self.recruitment_type,
            position_level: self.position_level,
            contract_type: self.contract_type,
            request_type: self.request_type,
            service_type: self.service_type,
            salary: self.salary,
            opening_date: self.opening_date,
            expected_start_date: self.expected_start_date,
            approver: self.approver,
            hr_responsible: self.hr_responsible,
            manager_responsible: self.manager_responsible,
            source_of_capture: self.source_of_capture,
            requirements: self.requirements,
            benefits: non_blank(self.benefits),
            observations: non_blank(self.observations),
            replaced_employee: non_blank(self.replaced_employee),
            selected_candidate: None,
            recruitment_time: None,
            hr_process_duration: None,
            closed_on: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates and overwrites the editable fields of `position`; status and tracking fields stay.
    pub fn apply_to(self, position: &mut Position, now: DateTime<Utc>) -> Result<(), IntakeViolation> {
        self.validate()?;

        position.position_code = self.position_code;
        position.job_title = self.job_title;
        position.department = self.department;
        position.location = self.location;
        position.recruitment_type = self.recruitment_type;
        position.position_level = self.position_level;
        position.contract_type = self.contract_type;
        position.request_type = self.request_type;
        position.service_type = self.service_type;
        position.salary = self.salary;
        position.opening_date = self.opening_date;
        position.expected_start_date = self.expected_start_date;
        position.approver = self.approver;
        position.hr_responsible = self.hr_responsible;
        position.manager_responsible = self.manager_responsible;
        position.source_of_capture = self.source_of_capture;
        position.requirements = self.requirements;
        position.benefits = non_blank(self.benefits);
        position.observations = non_blank(self.observations);
        position.replaced_employee = non_blank(self.replaced_employee);
        position.updated_at = now;
        Ok(())
    }
}

/// Length counts the text as typed; whitespace-only text is always too short.
fn is_short(text: &str, min_chars: usize) -> bool {
    text.trim().is_empty() || text.chars().count() < min_chars
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
