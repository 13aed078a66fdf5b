//! Error types for register searches
//!
//! Every failure of the search pipeline is one of the kinds below and travels
//! unchanged to the CLI boundary, which maps it to a distinct exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::orchestrator::WorkflowStep;

/// Result type alias for register operations
pub type RegisterResult<T> = Result<T, RegisterError>;

/// Error kinds of the search pipeline
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The search query cannot be executed as given
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// Cache directory or cache file unreadable or unwritable
    #[error("Cache storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A workflow step could not locate its element or its wait expired
    #[error("Browser automation failed at step '{step}': {message}")]
    Automation {
        step: WorkflowStep,
        message: String,
        timed_out: bool,
    },

    /// The page does not have the expected layout (no results grid)
    #[error("Unexpected page layout: {0}")]
    Structure(String),

    /// A result row does not have the 8 + 3k cell shape
    #[error("Malformed result row '{row}' ({cell_count} cells): {reason}")]
    MalformedRow {
        row: String,
        cell_count: usize,
        reason: String,
    },

    /// The caller cancelled the search
    #[error("Search was cancelled")]
    Cancelled,

    /// Chrome could not be found, downloaded or launched
    #[error("Browser setup failed: {0}")]
    Browser(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for RegisterError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        Self::Browser(format!("{err:#}"))
    }
}

impl RegisterError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn automation(step: WorkflowStep, message: impl Into<String>) -> Self {
        Self::Automation {
            step,
            message: message.into(),
            timed_out: false,
        }
    }

    pub(crate) fn step_timeout(step: WorkflowStep, limit: std::time::Duration) -> Self {
        Self::Automation {
            step,
            message: format!("timed out after {limit:?}"),
            timed_out: true,
        }
    }

    pub(crate) fn malformed_row(
        row: impl Into<String>,
        cell_count: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRow {
            row: row.into(),
            cell_count,
            reason: reason.into(),
        }
    }

    /// Short name of the error kind, printed by the CLI
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "invalid-query",
            Self::Storage { .. } => "storage",
            Self::Automation { .. } => "automation",
            Self::Structure(_) => "structure",
            Self::MalformedRow { .. } => "malformed-row",
            Self::Cancelled => "cancelled",
            Self::Browser(_) => "browser",
            Self::Config(_) => "config",
        }
    }

    /// Process exit code for this error kind
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidQuery(_) => 2,
            Self::Storage { .. } => 3,
            Self::Automation { .. } => 4,
            Self::Structure(_) => 5,
            Self::MalformedRow { .. } => 6,
            Self::Browser(_) | Self::Config(_) => 7,
            Self::Cancelled => 130,
        }
    }

    /// Only expired waits are worth another attempt; a missing element or a
    /// broken page will fail the same way again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Automation { timed_out: true, .. })
    }

    /// Workflow step that failed, for automation errors
    #[must_use]
    pub fn failed_step(&self) -> Option<WorkflowStep> {
        match self {
            Self::Automation { step, .. } => Some(*step),
            _ => None,
        }
    }
}
