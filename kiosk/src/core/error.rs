use shared::{AppError, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error("Failed to load {path}: {source}")]
    DatasetLoad {
        path: PathBuf,
        #[source]
        source: DatasetSourceError,
    },

    #[error("Invalid dataset: {0}")]
    DatasetInvalid(String),
}

/// Underlying cause of a dataset load failure
#[derive(Error, Debug)]
pub enum DatasetSourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl KioskError {
    pub fn dataset_load(path: impl Into<PathBuf>, source: impl Into<DatasetSourceError>) -> Self {
        Self::DatasetLoad {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            KioskError::DatasetLoad { .. } => ErrorCode::DatasetLoadFailed,
            KioskError::DatasetInvalid(_) => ErrorCode::DatasetInvalid,
        }
    }
}

impl From<KioskError> for AppError {
    fn from(err: KioskError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KioskError>;
