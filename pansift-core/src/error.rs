use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    /// Selection and ad filter left nothing to transfer.
    #[error("no transferable files: selection contains only ads or nothing at all")]
    EmptySelectionResult,

    #[error("Policy error: {0}")]
    Policy(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, SiftError>;
