use thiserror::Error;

#[derive(Debug, Error)]
pub enum AideError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("browser error: {0}")]
    Browser(String),
}

pub type AideResult<T> = Result<T, AideError>;
