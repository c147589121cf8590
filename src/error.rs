use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("post directory not found: {path}")]
    PostRootMissing { path: PathBuf },

    #[error("Invalid config in {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlogError {
    /// Process exit code for this failure. A missing post root gets its own
    /// code so wrapper scripts can tell "wrong directory" from a real failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            BlogError::PostRootMissing { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
