use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UnderhallError {
    #[error("OCR backend '{backend}' failed: {reason}")]
    Ocr { backend: String, reason: String },

    #[error("invalid recognition response: {0}")]
    InvalidResponse(String),

    #[error("failed to load recognition response from {path}: {reason}")]
    ResponseLoad { path: PathBuf, reason: String },

    #[error("document produced no recognized pages")]
    EmptyDocument,

    #[error("failed to load keyword profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid keyword profile: {0}")]
    ProfileInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
