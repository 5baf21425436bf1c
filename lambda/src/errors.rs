use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to parse storage notification: {0}")]
    InvalidEvent(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to access object storage: {0}")]
    StorageAccess(String),

    #[error("Source object is not valid UTF-8: {0}")]
    Decode(String),

    #[error("No voice found for language code {0}")]
    VoiceNotFound(String),

    #[error("Failed to synthesize speech: {0}")]
    Synthesis(String),
}

impl ProcessingError {
    /// Short machine-readable kind, used as a structured log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessingError::InvalidEvent(_) => "invalid_event",
            ProcessingError::Config(_) => "config",
            ProcessingError::StorageAccess(_) => "storage_access",
            ProcessingError::Decode(_) => "decode",
            ProcessingError::VoiceNotFound(_) => "voice_not_found",
            ProcessingError::Synthesis(_) => "synthesis",
        }
    }
}

impl From<serde_json::Error> for ProcessingError {
    fn from(error: serde_json::Error) -> Self {
        ProcessingError::InvalidEvent(error.to_string())
    }
}
