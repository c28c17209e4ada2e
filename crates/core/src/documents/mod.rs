//! Document metadata and OCR jobs.
//!
//! File bytes live in external storage; only metadata and the OCR result are
//! kept here. Completion and failure trigger the outbound webhook in
//! [`crate::notify`].

pub mod error;
pub mod ocr;
pub mod requests;

pub use error::DocumentError;
pub use ocr::{DocumentCategory, OcrJobService, OcrJobStatus, OcrOutcome};
pub use requests::{
    CompleteOcrJobRequest, FailOcrJobRequest, NewDocument, RegisterDocumentRequest,
};
