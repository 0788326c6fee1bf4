use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown spectrum: {0}")]
    UnknownSpectrum(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
