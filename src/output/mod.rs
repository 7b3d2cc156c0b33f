//! Output module.
//!
//! Terminal rendering of scan progress and results lives in [`plain`]. The
//! other submodules encode a finished scan for export to a file; the format
//! is picked from the file extension.

mod csv_format;
mod json_format;
mod plain;
mod text_format;

pub use csv_format::to_csv;
pub use json_format::{from_json, to_json};
pub use plain::{
    print_aborted, print_error, print_report, print_scan_header, print_success, print_warning,
};
pub use text_format::to_text;

use crate::error::{ExportError, ExportResult};
use crate::scanner::{ScanEntry, ScanReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// File formats a scan can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    /// Pick a format from the file extension; anything unrecognized is text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Read-only projection of a completed scan, stamped with its export time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub generated: DateTime<Utc>,
    pub target: String,
    pub results: Vec<ScanEntry>,
}

impl ExportRecord {
    pub fn new(report: &ScanReport) -> Self {
        Self::with_timestamp(report, Utc::now())
    }

    pub fn with_timestamp(report: &ScanReport, generated: DateTime<Utc>) -> Self {
        Self {
            generated,
            target: report.target.to_string(),
            results: report.results.clone(),
        }
    }
}

/// Encode `record` in the given format.
pub fn render(record: &ExportRecord, format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Json => to_json(record),
        ExportFormat::Csv => to_csv(record),
        ExportFormat::Text => Ok(to_text(record)),
    }
}

/// Write `report` to `path`, choosing the format from the extension.
pub fn export(report: &ScanReport, path: &Path) -> ExportResult<ExportFormat> {
    let format = ExportFormat::from_path(path);
    let content = render(&ExportRecord::new(report), format)?;

    fs::write(path, content).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), %format, entries = report.results.len(), "exported results");
    Ok(format)
}
