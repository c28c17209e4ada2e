//! Document error types.

use thiserror::Error;
use uuid::Uuid;

use super::ocr::OcrJobStatus;

/// Errors that can occur during document and OCR operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Attempted an invalid OCR job transition.
    #[error("Invalid OCR job status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: OcrJobStatus,
        /// The attempted target status.
        to: OcrJobStatus,
    },

    /// Document not found.
    #[error("Document {0} not found")]
    DocumentNotFound(Uuid),

    /// OCR job not found.
    #[error("OCR job {0} not found")]
    JobNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl DocumentError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 409,
            Self::DocumentNotFound(_) | Self::JobNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::JobNotFound(_) => "OCR_JOB_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
