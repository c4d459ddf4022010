use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::super::domain::{Candidate, Position};
use super::super::format::{format_date, format_score};
use super::super::metrics::DashboardMetrics;
use super::export::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Positions,
    Candidates,
    Metrics,
}

impl ReportKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Positions, Self::Candidates, Self::Metrics]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Positions => "positions",
            Self::Candidates => "candidates",
            Self::Metrics => "metrics",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Positions => "Relatório de Vagas",
            Self::Candidates => "Relatório de Candidatos",
            Self::Metrics => "Relatório de Métricas",
        }
    }

    pub const fn sheet_name(self) -> &'static str {
        match self {
            Self::Positions => "Vagas",
            Self::Candidates => "Candidatos",
            Self::Metrics => "Métricas",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportKind {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ExportError::UnsupportedKind(value.to_string()))
    }
}

/// Printable is the paginated document; flat is the one-row-per-record spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Printable,
    Flat,
}

impl ReportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Printable => "printable",
            Self::Flat => "flat",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Printable => "html",
            Self::Flat => "xlsx",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Printable => "text/html; charset=utf-8",
            Self::Flat => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "printable" | "pdf" | "html" => Ok(Self::Printable),
            "flat" | "excel" | "xlsx" => Ok(Self::Flat),
            _ => Err(ExportError::UnsupportedFormat(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Display form used by the printable document.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// Format-independent table handed to the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub kind: ReportKind,
    pub headings: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// Owned copy of everything one export needs.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    pub positions: Vec<Position>,
    pub candidates: Vec<Candidate>,
    pub metrics: DashboardMetrics,
}

const POSITION_HEADINGS: [&str; 7] = [
    "Código",
    "Cargo",
    "Departamento",
    "Status",
    "Tipo",
    "Nível",
    "Data Abertura",
];

const CANDIDATE_HEADINGS: [&str; 6] = [
    "Nome",
    "Email",
    "Telefone",
    "Etapa",
    "Data Aplicação",
    "Pontuação",
];

const METRIC_HEADINGS: [&str; 2] = ["Métrica", "Valor"];

impl ReportTable {
    pub fn build(kind: ReportKind, format: ReportFormat, snapshot: &ReportSnapshot) -> Self {
        match kind {
            ReportKind::Positions => Self::positions(&snapshot.positions, format),
            ReportKind::Candidates => Self::candidates(&snapshot.candidates, format),
            ReportKind::Metrics => Self::metrics(&snapshot.metrics, format),
        }
    }

    pub fn positions(positions: &[Position], format: ReportFormat) -> Self {
        let flat = format == ReportFormat::Flat;
        let mut headings = POSITION_HEADINGS.to_vec();
        if flat {
            headings.push("Requisitos");
        }

        let rows = positions
            .iter()
            .map(|position| {
                let mut row = vec![
                    Cell::text(&position.position_code),
                    Cell::text(&position.job_title),
                    Cell::text(&position.department),
                    Cell::text(position.status.as_str()),
                    Cell::text(position.recruitment_type.as_str()),
                    Cell::text(position.position_level.as_str()),
                    Cell::text(format_date(position.opening_date)),
                ];
                if flat {
                    row.push(Cell::text(&position.requirements));
                }
                row
            })
            .collect();

        Self {
            kind: ReportKind::Positions,
            headings,
            rows,
        }
    }

    pub fn candidates(candidates: &[Candidate], format: ReportFormat) -> Self {
        let flat = format == ReportFormat::Flat;
        let mut headings = CANDIDATE_HEADINGS.to_vec();
        if flat {
            headings.push("Fonte");
        }

        let rows = candidates
            .iter()
            .map(|candidate| {
                let score = match (candidate.score, flat) {
                    (None, _) => Cell::Empty,
                    (Some(score), true) => Cell::Number(f64::from(score)),
                    (Some(score), false) => Cell::Text(format_score(score)),
                };
                let mut row = vec![
                    Cell::text(&candidate.name),
                    Cell::text(&candidate.email),
                    Cell::text(&candidate.phone),
                    Cell::text(candidate.current_stage.as_str()),
                    Cell::text(format_date(candidate.applied_at.date_naive())),
                    score,
                ];
                if flat {
                    row.push(Cell::text(candidate.source.as_str()));
                }
                row
            })
            .collect();

        Self {
            kind: ReportKind::Candidates,
            headings,
            rows,
        }
    }

    /// Six rows in fixed order. Flat output keeps raw numbers and moves units into the label.
    pub fn metrics(metrics: &DashboardMetrics, format: ReportFormat) -> Self {
        let rows = match format {
            ReportFormat::Printable => vec![
                metric_row("Total de Vagas", metrics.total_positions.to_string()),
                metric_row("Vagas Ativas", metrics.active_positions.to_string()),
                metric_row("Vagas Finalizadas", metrics.completed_positions.to_string()),
                metric_row(
                    "Tempo Médio de Recrutamento",
                    format!("{} dias", metrics.avg_recruitment_time),
                ),
                metric_row("Tempo Médio RH", format!("{} dias", metrics.avg_hr_time)),
                metric_row("Taxa de Conversão", format!("{}%", metrics.conversion_rate)),
            ],
            ReportFormat::Flat => vec![
                numeric_row("Total de Vagas", metrics.total_positions as f64),
                numeric_row("Vagas Ativas", metrics.active_positions as f64),
                numeric_row("Vagas Finalizadas", metrics.completed_positions as f64),
                numeric_row(
                    "Tempo Médio de Recrutamento (dias)",
                    f64::from(metrics.avg_recruitment_time),
                ),
                numeric_row("Tempo Médio RH (dias)", f64::from(metrics.avg_hr_time)),
                numeric_row("Taxa de Conversão (%)", metrics.conversion_rate),
            ],
        };

        Self {
            kind: ReportKind::Metrics,
            headings: METRIC_HEADINGS.to_vec(),
            rows,
        }
    }
}

fn metric_row(label: &str, value: String) -> Vec<Cell> {
    vec![Cell::text(label), Cell::Text(value)]
}

fn numeric_row(label: &str, value: f64) -> Vec<Cell> {
    vec![Cell::text(label), Cell::Number(value)]
}
