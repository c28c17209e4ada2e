//! Webhook payload shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::documents::{OcrJobStatus, OcrOutcome};

/// Event name sent with each notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OcrEvent {
    /// OCR extraction succeeded.
    #[serde(rename = "ocr.completed")]
    Completed,
    /// OCR extraction failed.
    #[serde(rename = "ocr.failed")]
    Failed,
}

impl OcrEvent {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "ocr.completed",
            Self::Failed => "ocr.failed",
        }
    }
}

/// Body posted to webhook destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrWebhookPayload {
    /// Event name.
    pub event: OcrEvent,
    /// OCR job id.
    pub job_id: Uuid,
    /// Document the job belongs to.
    pub document_id: Uuid,
    /// Final job status.
    pub status: OcrJobStatus,
    /// Confidence for completed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Decimal>,
    /// Extracted text for completed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    /// Error for failed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// When the job finished.
    pub timestamp: DateTime<Utc>,
}

impl OcrWebhookPayload {
    /// Builds the payload for a finished job.
    #[must_use]
    pub fn for_outcome(
        job_id: Uuid,
        document_id: Uuid,
        outcome: &OcrOutcome,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let base = Self {
            event: OcrEvent::Completed,
            job_id,
            document_id,
            status: outcome.status(),
            confidence: None,
            extracted_text: None,
            error_message: None,
            timestamp,
        };
        match outcome {
            OcrOutcome::Completed {
                extracted_text,
                confidence,
            } => Self {
                confidence: Some(*confidence),
                extracted_text: Some(extracted_text.clone()),
                ..base
            },
            OcrOutcome::Failed { error_message } => Self {
                event: OcrEvent::Failed,
                error_message: Some(error_message.clone()),
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_completed_payload_shape() {
        let outcome = OcrOutcome::Completed {
            extracted_text: "TOTAL 1,200.00".into(),
            confidence: dec!(91.2),
        };
        let payload = OcrWebhookPayload::for_outcome(Uuid::nil(), Uuid::nil(), &outcome, Utc::now());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["event"], "ocr.completed");
        assert_eq!(json["status"], "COMPLETED");
        assert_eq!(json["extractedText"], "TOTAL 1,200.00");
        assert!(json.get("errorMessage").is_none());
        assert!(json.get("jobId").is_some());
    }

    #[test]
    fn test_failed_payload_omits_result_fields() {
        let outcome = OcrOutcome::Failed {
            error_message: "blank page".into(),
        };
        let payload = OcrWebhookPayload::for_outcome(Uuid::nil(), Uuid::nil(), &outcome, Utc::now());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["event"], "ocr.failed");
        assert_eq!(json["status"], "FAILED");
        assert_eq!(json["errorMessage"], "blank page");
        assert!(json.get("confidence").is_none());
        assert!(json.get("extractedText").is_none());
    }
}
