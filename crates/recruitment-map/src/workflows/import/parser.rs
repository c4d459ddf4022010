use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::ImportError;
use crate::workflows::recruitment::{
    Candidate, CandidateId, CandidateSource, CandidateStage, ContractType, Position, PositionId,
    PositionLevel, PositionStatus, RecruitmentType, RequestType, ServiceType,
};

/// Fallback line for the first record when the reader reports no position.
const FIRST_DATA_LINE: u64 = 2;

pub(crate) fn parse_positions<R: Read>(
    reader: R,
    now: DateTime<Utc>,
) -> Result<Vec<Position>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut positions = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row: PositionRow = record.deserialize(Some(&headers))?;
        positions.push(row.into_position(record_line(&record, index), now)?);
    }

    Ok(positions)
}

pub(crate) fn parse_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut candidates = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row: CandidateRow = record.deserialize(Some(&headers))?;
        candidates.push(row.into_candidate(record_line(&record, index))?);
    }

    Ok(candidates)
}

/// Line the record starts on; quoted cells may span several physical lines.
fn record_line(record: &csv::StringRecord, index: usize) -> u64 {
    record
        .position()
        .map(csv::Position::line)
        .unwrap_or(FIRST_DATA_LINE + index as u64)
}

#[derive(Debug, Deserialize)]
struct PositionRow {
    id: String,
    position_code: String,
    job_title: String,
    department: String,
    #[serde(default)]
    location: String,
    status: PositionStatus,
    recruitment_type: RecruitmentType,
    position_level: PositionLevel,
    contract_type: ContractType,
    request_type: RequestType,
    service_type: ServiceType,
    #[serde(default)]
    salary: Option<f64>,
    opening_date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    expected_start_date: Option<String>,
    #[serde(default)]
    approver: String,
    #[serde(default)]
    hr_responsible: String,
    #[serde(default)]
    manager_responsible: String,
    #[serde(default)]
    source_of_capture: String,
    #[serde(default)]
    requirements: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    benefits: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    observations: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    replaced_employee: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    selected_candidate: Option<String>,
    #[serde(default)]
    recruitment_time: Option<u32>,
    #[serde(default)]
    hr_process_duration: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    closed_on: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    updated_at: Option<String>,
}

impl PositionRow {
    fn into_position(self, line: u64, now: DateTime<Utc>) -> Result<Position, ImportError> {
        let opening_date = required_date(line, "opening_date", &self.opening_date)?;
        let expected_start_date =
            optional_date(line, "expected_start_date", self.expected_start_date.as_deref())?;
        let closed_on = optional_date(line, "closed_on", self.closed_on.as_deref())?;
        let created_at =
            optional_timestamp(line, "created_at", self.created_at.as_deref())?.unwrap_or(now);
        let updated_at =
            optional_timestamp(line, "updated_at", self.updated_at.as_deref())?.unwrap_or(created_at);

        Ok(Position {
            id: PositionId(self.id),
            position_code: self.position_code,
            job_title: self.job_title,
            department: self.department,
            location: self.location,
            status: self.status,
            recruitment_type: self.recruitment_type,
            position_level: self.position_level,
            contract_type: self.contract_type,
            request_type: self.request_type,
            service_type: self.service_type,
            salary: self.salary,
            opening_date,
            expected_start_date,
            approver: self.approver,
            hr_responsible: self.hr_responsible,
            manager_responsible: self.manager_responsible,
            source_of_capture: self.source_of_capture,
            requirements: self.requirements,
            benefits: self.benefits,
            observations: self.observations,
            replaced_employee: self.replaced_employee,
            selected_candidate: self.selected_candidate,
            recruitment_time: self.recruitment_time,
            hr_process_duration: self.hr_process_duration,
            closed_on: closed_on.filter(|_| self.status.is_closed()),
            created_at,
            updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    id: String,
    position_id: String,
    name: String,
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    resume_url: Option<String>,
    source: CandidateSource,
    current_stage: CandidateStage,
    #[serde(default)]
    score: Option<f32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    applied_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_updated: Option<String>,
}

impl CandidateRow {
    fn into_candidate(self, line: u64) -> Result<Candidate, ImportError> {
        let applied_at = parse_timestamp(&self.applied_at).ok_or_else(|| ImportError::InvalidDate {
            line,
            field: "applied_at",
            value: self.applied_at.clone(),
        })?;
        let last_updated = optional_timestamp(line, "last_updated", self.last_updated.as_deref())?
            .unwrap_or(applied_at);

        Ok(Candidate {
            id: CandidateId(self.id),
            position_id: PositionId(self.position_id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            resume_url: self.resume_url,
            source: self.source,
            current_stage: self.current_stage,
            score: self.score,
            notes: self.notes,
            applied_at,
            last_updated,
            interviews: Vec::new(),
            documents: Vec::new(),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn required_date(line: u64, field: &'static str, raw: &str) -> Result<NaiveDate, ImportError> {
    parse_date(raw).ok_or_else(|| ImportError::InvalidDate {
        line,
        field,
        value: raw.to_string(),
    })
}

fn optional_date(
    line: u64,
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, ImportError> {
    raw.map(|raw| required_date(line, field, raw)).transpose()
}

fn optional_timestamp(
    line: u64,
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ImportError> {
    raw.map(|raw| {
        parse_timestamp(raw).ok_or_else(|| ImportError::InvalidDate {
            line,
            field,
            value: raw.to_string(),
        })
    })
    .transpose()
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_timestamp(value).map(|timestamp| timestamp.date_naive())
}

/// Accepts an RFC 3339 timestamp or `YYYY-MM-DD`, read as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
