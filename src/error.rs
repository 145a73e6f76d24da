//! Error types for report building

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or classifying a run record
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("category '{category}' references unknown audit '{audit}'")]
    UnknownAudit { category: String, audit: String },

    #[error("audit '{audit}' in category '{category}' references unknown group '{group}'")]
    UnknownGroup {
        category: String,
        audit: String,
        group: String,
    },

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("failed to parse run record: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;
