use std::{fmt, io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that abort an import run, or a single reader / writer call.
///
/// Per-row problems are reported as [`ValidationError`] instead and never
/// abort a run.
pub enum ImportError {
    #[error("Can not find file {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Can not read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid CSV header: {0}")]
    Header(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("ItemReader from: {0}")]
    ItemReader(String),

    #[error("ItemWriter from: {0}")]
    ItemWriter(String),

    #[error("Step {name} failed: {source}")]
    Step {
        name: String,
        #[source]
        source: Box<ImportError>,
    },
}

/// How a row level problem affects the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The row is skipped, no record is produced.
    Fatal,
    /// The row is imported with partial data.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => f.write_str("fatal"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    MissingRequiredField,
    UndeterminedCulture,
    UnknownType,
    UnresolvedReference,
    MalformedRow,
}

/// A problem found while validating one row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    severity: Severity,
    kind: ValidationKind,
    row_index: usize,
    message: String,
}

impl ValidationError {
    pub fn fatal(kind: ValidationKind, row_index: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            kind,
            row_index,
            message: message.into(),
        }
    }

    pub fn warning(kind: ValidationKind, row_index: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            row_index,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> ValidationKind {
        self.kind
    }

    /// 1-based index of the data row (the header line is not counted).
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}
