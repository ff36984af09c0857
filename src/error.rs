use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Store error: {0}")]
    StoreError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
