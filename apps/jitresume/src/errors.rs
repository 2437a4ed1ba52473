use thiserror::Error;

/// Application-level error type.
/// Every variant is fatal for the current render; there is no partial-result recovery.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Profile API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Profile decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Profile is missing required field: {0}")]
    MissingField(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResumeError {
    /// Short machine-readable code, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            ResumeError::MissingCredential(_) => "MISSING_CREDENTIAL",
            ResumeError::Http(_) => "HTTP_ERROR",
            ResumeError::Api { .. } => "API_ERROR",
            ResumeError::Decode(_) => "DECODE_ERROR",
            ResumeError::MissingField(_) => "MISSING_FIELD",
            ResumeError::Io(_) => "IO_ERROR",
        }
    }
}
