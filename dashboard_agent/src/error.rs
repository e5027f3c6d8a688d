//! Collector failure taxonomy. These never reach the HTTP client: each
//! collector logs them and falls back to its neutral value.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("cannot read {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {source_name}: {reason}")]
    ParseMalformed {
        source_name: &'static str,
        reason: String,
    },

    #[error("external command failed: {0}")]
    ProcessFailure(String),

    #[error("external command timed out after {0:?}")]
    Timeout(Duration),
}

impl CollectError {
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CollectError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(source_name: &'static str, reason: impl Into<String>) -> Self {
        CollectError::ParseMalformed {
            source_name,
            reason: reason.into(),
        }
    }
}
