use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatStoreError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse record at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize record for {path}: {source}")]
    JsonSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("record at {path} has unsupported version {found}; expected 1")]
    UnsupportedVersion { path: PathBuf, found: u32 },

    #[error("record at {path} has invalid RFC3339 timestamp in field 'saved_at': {value}")]
    InvalidTimestamp { path: PathBuf, value: String },

    #[error("failed to format current UTC timestamp as RFC3339: {0}")]
    ClockFormat(#[source] time::error::Format),
}

impl ChatStoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_serialize(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonSerialize {
            path: path.into(),
            source,
        }
    }
}
