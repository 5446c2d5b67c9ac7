use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid export scale {0}: must be a finite number greater than zero")]
    InvalidScale(f64),
    #[error("unparsable export scale: {0}")]
    UnparsableScale(String),
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
    #[error("unknown export status: {0}")]
    UnknownStatus(String),
    #[error("unknown export preset: {0}")]
    UnknownPreset(String),
    #[error("malformed export descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
