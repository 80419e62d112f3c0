use thiserror::Error;

/// Errors that can occur while preparing a test data directory.
#[derive(Error, Debug)]
pub enum TestError {
    /// Creating the directory or writing a seed file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A seed document could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
