use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Error, Debug)]
pub enum InquiryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("No inquiry has been submitted yet")]
    NothingSubmitted,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, InquiryError>;
