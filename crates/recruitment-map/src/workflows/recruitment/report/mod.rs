//! Tabular report export in a printable (paginated HTML) and a flat (XLSX) shape.

mod export;
mod flat;
mod printable;
mod schema;

pub use export::{ExportError, ExportNotifier, ExportRequest, ExportedReport, ReportExporter};
pub use schema::{Cell, ReportFormat, ReportKind, ReportSnapshot, ReportTable};
