//! CSV import of position and candidate datasets.

mod parser;

use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::workflows::recruitment::{Candidate, Position};

pub use parser::{parse_date, parse_timestamp};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate {
        line: u64,
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read dataset: {err}"),
            ImportError::Csv(err) => write!(f, "invalid dataset CSV: {err}"),
            ImportError::InvalidDate { line, field, value } => write!(
                f,
                "line {line}: `{field}` must be YYYY-MM-DD or RFC 3339, found '{value}'"
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidDate { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Positions and candidates loaded together.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub positions: Vec<Position>,
    pub candidates: Vec<Candidate>,
}

pub struct DatasetImporter;

impl DatasetImporter {
    /// `now` stands in for missing `created_at` / `updated_at` columns.
    pub fn positions_from_reader<R: Read>(
        reader: R,
        now: DateTime<Utc>,
    ) -> Result<Vec<Position>, ImportError> {
        parser::parse_positions(reader, now)
    }

    pub fn candidates_from_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, ImportError> {
        parser::parse_candidates(reader)
    }

    pub fn from_paths(
        positions: Option<&Path>,
        candidates: Option<&Path>,
        now: DateTime<Utc>,
    ) -> Result<Dataset, ImportError> {
        let positions = match positions {
            Some(path) => Self::positions_from_reader(std::fs::File::open(path)?, now)?,
            None => Vec::new(),
        };
        let candidates = match candidates {
            Some(path) => Self::candidates_from_reader(std::fs::File::open(path)?)?,
            None => Vec::new(),
        };

        Ok(Dataset {
            positions,
            candidates,
        })
    }
}
