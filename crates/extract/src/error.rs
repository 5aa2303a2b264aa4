/// Result type for attribution operations
pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Caller broke a precondition, e.g. resolving against no candidates.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An answer chunk has no `LABEL:` speaker marker.
    #[error("No speaker label in answer chunk: {chunk:?}")]
    Attribution { chunk: String },
}

impl ExtractError {
    pub fn attribution(chunk: &str) -> Self {
        // Keep log lines short on long chunks
        let chunk: String = chunk.trim().chars().take(80).collect();
        Self::Attribution { chunk }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Attribution { .. })
    }
}
