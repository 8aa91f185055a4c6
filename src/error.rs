use gesture::shape::DimensionError;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid session record: {source}")]
    BadLine { line: usize, source: serde_json::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid viewport `{0}`; expected WIDTHxHEIGHT")]
    InvalidViewport(String),
    #[error("fps must be positive, got {0}")]
    InvalidFps(f64),
    #[error("jitter must be a finite non-negative number, got {0}")]
    InvalidJitter(f64),
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}
