//! Document categories and the OCR job state machine.

use rust_decimal::Decimal;

use super::error::DocumentError;
use crate::macros::string_enum;

string_enum! {
    /// Document category.
    pub enum DocumentCategory {
        /// Vendor invoice scan.
        Invoice => "INVOICE",
        /// Delivery note.
        DeliveryNote => "DELIVERY_NOTE",
        /// Contract.
        Contract => "CONTRACT",
        /// Safety report or permit.
        SafetyReport => "SAFETY_REPORT",
        /// Vehicle paperwork.
        VehicleDocument => "VEHICLE_DOCUMENT",
        /// HR paperwork.
        HrDocument => "HR_DOCUMENT",
        /// Anything else.
        Other => "OTHER",
    }
}

string_enum! {
    /// OCR job lifecycle.
    pub enum OcrJobStatus {
        /// Waiting for a worker.
        Queued => "QUEUED",
        /// Picked up by a worker.
        Processing => "PROCESSING",
        /// Text extracted.
        Completed => "COMPLETED",
        /// Extraction failed.
        Failed => "FAILED",
    }
}

/// Terminal result reported by the OCR worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    /// Text extracted.
    Completed {
        /// Extracted text.
        extracted_text: String,
        /// Confidence, 0-100.
        confidence: Decimal,
    },
    /// Extraction failed.
    Failed {
        /// Worker error message.
        error_message: String,
    },
}

impl OcrOutcome {
    /// Status the job moves to.
    #[must_use]
    pub const fn status(&self) -> OcrJobStatus {
        match self {
            Self::Completed { .. } => OcrJobStatus::Completed,
            Self::Failed { .. } => OcrJobStatus::Failed,
        }
    }
}

impl OcrJobStatus {
    /// Returns true once the job has finished either way.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Stateless OCR job transitions.
pub struct OcrJobService;

impl OcrJobService {
    /// Queued → Processing.
    pub fn start(current: OcrJobStatus) -> Result<OcrJobStatus, DocumentError> {
        match current {
            OcrJobStatus::Queued => Ok(OcrJobStatus::Processing),
            _ => Err(DocumentError::InvalidTransition {
                from: current,
                to: OcrJobStatus::Processing,
            }),
        }
    }

    /// Queued | Processing → Completed | Failed.
    pub fn finish(
        current: OcrJobStatus,
        outcome: &OcrOutcome,
    ) -> Result<OcrJobStatus, DocumentError> {
        let to = outcome.status();
        if current.is_terminal() {
            return Err(DocumentError::InvalidTransition { from: current, to });
        }
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn completed() -> OcrOutcome {
        OcrOutcome::Completed {
            extracted_text: "INVOICE 0042".into(),
            confidence: dec!(97.5),
        }
    }

    #[test]
    fn test_job_lifecycle() {
        let s = OcrJobService::start(OcrJobStatus::Queued).unwrap();
        assert_eq!(OcrJobService::finish(s, &completed()).unwrap(), OcrJobStatus::Completed);
    }

    #[test]
    fn test_queued_job_can_fail_directly() {
        let outcome = OcrOutcome::Failed {
            error_message: "unreadable scan".into(),
        };
        assert_eq!(
            OcrJobService::finish(OcrJobStatus::Queued, &outcome).unwrap(),
            OcrJobStatus::Failed
        );
    }

    #[test]
    fn test_terminal_jobs_are_final() {
        assert!(OcrJobService::finish(OcrJobStatus::Completed, &completed()).is_err());
        assert!(OcrJobService::start(OcrJobStatus::Processing).is_err());
    }
}
