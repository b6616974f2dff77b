use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("required column '{0}' not found")]
    MissingColumn(String),
    #[error("invalid artifact name '{0}': {1}")]
    InvalidArtifactName(String, &'static str),
    #[error("invalid artifact version '{0}' (expected 'latest' or 'v<N>')")]
    InvalidArtifactVersion(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
