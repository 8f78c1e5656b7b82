use domain::artist::ArtistError;
use domain::value::MalformedId;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Invalid artist ID")]
    InvalidArtistId(String),
    #[error("Duplicate {0}: {1}={2}")]
    DuplicateKey(String, String, String),
    #[error("Aggregate not found: {0}: {1}")]
    AggregateNotFound(String, String),
    #[error("{0}")]
    RepositoryError(String),
}

impl From<ArtistError> for AppError {
    fn from(err: ArtistError) -> Self {
        match err {
            ArtistError::MissingField { .. } => AppError::InvalidInput(err.to_string()),
            ArtistError::DuplicateKey { field, value } => {
                AppError::DuplicateKey("artist".to_string(), field, value)
            }
            ArtistError::DbErr(msg) => AppError::RepositoryError(msg),
        }
    }
}

impl From<MalformedId> for AppError {
    fn from(err: MalformedId) -> Self {
        AppError::InvalidArtistId(err.0)
    }
}
