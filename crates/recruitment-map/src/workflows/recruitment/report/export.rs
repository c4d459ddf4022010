use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::schema::{ReportFormat, ReportKind, ReportSnapshot, ReportTable};
use super::{flat, printable};

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub kind: ReportKind,
    pub format: ReportFormat,
}

/// Metadata for a report file that was fully written and renamed into place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedReport {
    pub kind: ReportKind,
    pub format: ReportFormat,
    pub file_name: String,
    pub path: PathBuf,
    pub content_type: &'static str,
    pub rows: usize,
    pub size_bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported report kind `{0}`")]
    UnsupportedKind(String),
    #[error("unsupported report format `{0}`")]
    UnsupportedFormat(String),
    #[error("failed to build spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("report worker stopped before finishing: {0}")]
    Worker(String),
}

/// Receives the outcome of every export attempt.
pub trait ExportNotifier: Send + Sync {
    fn export_succeeded(&self, report: &ExportedReport);
    fn export_failed(&self, kind: &str, error: &ExportError);
}

/// Writes reports into `output_dir`.
///
/// Each call works on its own [`ReportSnapshot`], so concurrent exports never share
/// mutable state beyond the in-flight counter behind [`ReportExporter::is_exporting`].
pub struct ReportExporter {
    output_dir: PathBuf,
    notifier: Arc<dyn ExportNotifier>,
    in_flight: Arc<AtomicUsize>,
}

impl std::fmt::Debug for ReportExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportExporter")
            .field("output_dir", &self.output_dir)
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .finish()
    }
}

impl ReportExporter {
    pub fn new(output_dir: impl Into<PathBuf>, notifier: Arc<dyn ExportNotifier>) -> Self {
        Self {
            output_dir: output_dir.into(),
            notifier,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// `relatorio-<kind>-<yyyyMMdd-HHmm>.<ext>`
    pub fn file_name(kind: ReportKind, format: ReportFormat, now: DateTime<Utc>) -> String {
        format!(
            "relatorio-{}-{}.{}",
            kind.slug(),
            now.format("%Y%m%d-%H%M"),
            format.extension()
        )
    }

    /// Renders the report bytes without touching the filesystem.
    pub fn render(
        request: ExportRequest,
        snapshot: &ReportSnapshot,
        now: DateTime<Utc>,
    ) -> Result<(usize, Vec<u8>), ExportError> {
        let table = ReportTable::build(request.kind, request.format, snapshot);
        let rows = table.rows.len();
        let bytes = match request.format {
            ReportFormat::Printable => printable::render(&table, now).into_bytes(),
            ReportFormat::Flat => flat::render(&table)?,
        };
        Ok((rows, bytes))
    }

    /// Parses `kind` and `format` before exporting; parse failures go through the notifier too.
    pub async fn export_named(
        &self,
        snapshot: ReportSnapshot,
        kind: &str,
        format: &str,
        now: DateTime<Utc>,
    ) -> Result<ExportedReport, ExportError> {
        let parsed = kind.parse::<ReportKind>().and_then(|kind| {
            format
                .parse::<ReportFormat>()
                .map(|format| ExportRequest { kind, format })
        });

        match parsed {
            Ok(request) => self.export(snapshot, request, now).await,
            Err(error) => {
                self.notifier.export_failed(kind, &error);
                Err(error)
            }
        }
    }

    pub async fn export(
        &self,
        snapshot: ReportSnapshot,
        request: ExportRequest,
        now: DateTime<Utc>,
    ) -> Result<ExportedReport, ExportError> {
        let _guard = InFlight::enter(&self.in_flight);

        match self.write_report(snapshot, request, now).await {
            Ok(report) => {
                info!(
                    kind = request.kind.slug(),
                    format = request.format.as_str(),
                    rows = report.rows,
                    path = %report.path.display(),
                    "report exported"
                );
                self.notifier.export_succeeded(&report);
                Ok(report)
            }
            Err(error) => {
                self.notifier.export_failed(request.kind.slug(), &error);
                Err(error)
            }
        }
    }

    async fn write_report(
        &self,
        snapshot: ReportSnapshot,
        request: ExportRequest,
        now: DateTime<Utc>,
    ) -> Result<ExportedReport, ExportError> {
        let (rows, bytes) =
            tokio::task::spawn_blocking(move || Self::render(request, &snapshot, now))
                .await
                .map_err(|error| ExportError::Worker(error.to_string()))??;

        let file_name = Self::file_name(request.kind, request.format, now);
        let path = self.output_dir.join(&file_name);
        // Same-minute exports share `file_name`; each writes its own temp file.
        let sequence = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let temp_path = self
            .output_dir
            .join(format!(".{file_name}.{}-{sequence}.tmp", std::process::id()));

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| ExportError::Io {
                path: self.output_dir.clone(),
                source,
            })?;

        if let Err(source) = tokio::fs::write(&temp_path, &bytes).await {
            discard(&temp_path).await;
            return Err(ExportError::Io {
                path: temp_path,
                source,
            });
        }

        if let Err(source) = tokio::fs::rename(&temp_path, &path).await {
            discard(&temp_path).await;
            return Err(ExportError::Io { path, source });
        }

        Ok(ExportedReport {
            kind: request.kind,
            format: request.format,
            file_name,
            path,
            content_type: request.format.content_type(),
            rows,
            size_bytes: bytes.len(),
        })
    }
}

async fn discard(path: &Path) {
    if let Err(error) = tokio::fs::remove_file(path).await {
        debug!(path = %path.display(), %error, "no partial report to remove");
    }
}

struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
