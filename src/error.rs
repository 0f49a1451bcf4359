use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    /// No eligible candidate matched. Carries the input path verbatim.
    #[error("Could not detect package manager for file: {0}")]
    NotDetected(String),

    #[error("{0}")]
    InvalidArgument(String),
}

impl DetectError {
    pub fn not_detected(path: impl Into<String>) -> Self {
        DetectError::NotDetected(path.into())
    }

    pub fn is_not_detected(&self) -> bool {
        matches!(self, DetectError::NotDetected(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DetectError::InvalidArgument(_))
    }
}
