use std::path::PathBuf;

use thiserror::Error;

/// Failures raised below the presentation layer.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Weights missing or unreadable. Fatal at startup.
    #[error("failed to load model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("inference failed for {path}: {reason}")]
    Inference { path: PathBuf, reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DetectError {
    pub fn model_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn inference(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Inference {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type DetectResult<T> = Result<T, DetectError>;
