use super::domain::Position;
use super::format::format_brl;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain job description handed to the external publisher after a position is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
}

impl JobPosting {
    pub fn from_position(position: &Position, company: &str) -> Self {
        let salary = position
            .salary
            .map(format_brl)
            .unwrap_or_else(|| "A combinar".to_string());

        let description = format!(
            "Vaga: {}\nSetor: {}\nNível: {}\nTipo: {}\n\nRequisitos:\n{}",
            position.job_title,
            position.department,
            position.position_level.as_str(),
            position.contract_type.as_str(),
            position.requirements
        );

        Self {
            job_title: position.job_title.clone(),
            company: company.to_string(),
            location: position.location.clone(),
            job_type: position.contract_type.as_str().to_string(),
            salary,
            description,
            requirements: non_blank_lines(&position.requirements),
            benefits: position
                .benefits
                .as_deref()
                .map(non_blank_lines)
                .unwrap_or_default(),
        }
    }
}

fn non_blank_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Where new postings go, as configured for the deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishTargets {
    pub company: String,
    pub platforms: Vec<String>,
    pub webhook_urls: Vec<String>,
}

impl Default for PublishTargets {
    fn default() -> Self {
        Self {
            company: "Resolve Energia Solar".to_string(),
            platforms: vec!["linkedin".to_string()],
            webhook_urls: Vec::new(),
        }
    }
}

impl PublishTargets {
    pub fn request_for(&self, position: &Position) -> PublishRequest {
        PublishRequest {
            job: JobPosting::from_position(position, &self.company),
            platforms: self.platforms.clone(),
            webhook_urls: self.webhook_urls.clone(),
        }
    }
}

/// Publication request: target platforms plus webhook URLs that receive a `job_created` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub job: JobPosting,
    pub platforms: Vec<String>,
    #[serde(default)]
    pub webhook_urls: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEventKind {
    JobCreated,
}

/// Body forwarded to each webhook URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEvent {
    pub event: JobEventKind,
    pub timestamp: DateTime<Utc>,
    pub data: JobPosting,
}

impl JobEvent {
    pub fn job_created(job: JobPosting, timestamp: DateTime<Utc>) -> Self {
        Self {
            event: JobEventKind::JobCreated,
            timestamp,
            data: job,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformOutcome {
    pub platform: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishReceipt {
    pub platforms: Vec<PlatformOutcome>,
    pub webhooks_notified: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("publisher transport unavailable: {0}")]
    Transport(String),
    #[error("{platform} rejected the posting: {reason}")]
    Rejected { platform: String, reason: String },
}

/// Outbound hook to job boards and workflow webhooks.
pub trait JobPublisher: Send + Sync {
    fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, PublishError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::recruitment::tests::common::position;

    #[test]
    fn posting_formats_salary_and_splits_lists() {
        let mut position = position("p1", "open");
        position.salary = Some(5000.0);
        position.requirements = "Rust\n\n  \nSQL".to_string();
        position.benefits = Some("Plano de saúde\nVR".to_string());

        let posting = JobPosting::from_position(&position, "Resolve Energia Solar");
        assert_eq!(posting.salary, "R$ 5.000,00");
        assert_eq!(posting.requirements, vec!["Rust", "SQL"]);
        assert_eq!(posting.benefits, vec!["Plano de saúde", "VR"]);
        assert_eq!(posting.job_type, "clt");
        assert!(posting.description.starts_with("Vaga: "));
        assert!(posting.description.contains("Requisitos:\nRust"));
    }

    #[test]
    fn posting_without_salary_is_negotiable() {
        let mut position = position("p1", "open");
        position.salary = None;
        position.benefits = None;

        let posting = JobPosting::from_position(&position, "ACME");
        assert_eq!(posting.salary, "A combinar");
        assert!(posting.benefits.is_empty());
    }

    #[test]
    fn job_created_event_serializes_snake_case() {
        let posting = JobPosting::from_position(&position("p1", "open"), "ACME");
        let event = JobEvent::job_created(posting, position("p1", "open").created_at);
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(json["event"], "job_created");
        assert_eq!(json["data"]["company"], "ACME");
    }
}
