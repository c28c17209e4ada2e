//! Document and OCR payloads.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::ocr::{DocumentCategory, OcrOutcome};
use crate::validation::{FieldErrors, LooseValue, Validate, ValidationErrors};

const MAX_SIZE_BYTES: u32 = 50 * 1024 * 1024;

/// Payload for `POST /documents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDocumentRequest {
    /// Title.
    pub title: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Where the file is stored.
    pub file_url: Option<String>,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size in bytes.
    pub size_bytes: Option<String>,
}

/// A validated document registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    /// Title.
    pub title: String,
    /// Category.
    pub category: DocumentCategory,
    /// File URL.
    pub file_url: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: Option<u32>,
}

impl Validate for RegisterDocumentRequest {
    type Output = NewDocument;

    fn validate(self) -> Result<NewDocument, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let title = errs.required_text("title", self.title.as_deref());
        let category = errs.enum_value::<DocumentCategory>("category", self.category.as_deref());
        let file_url = errs.url("fileUrl", self.file_url.as_deref());
        let mime_type = errs.required_text("mimeType", self.mime_type.as_deref());
        if let Some(mime) = &mime_type
            && !mime.contains('/')
        {
            errs.add("mimeType", "mime_type", "mimeType must look like type/subtype");
        }
        let size_bytes = errs.integer_in_range("sizeBytes", self.size_bytes.as_deref(), 1, MAX_SIZE_BYTES);

        match (title, category, file_url, mime_type) {
            (Some(title), Some(category), Some(file_url), Some(mime_type)) if errs.is_empty() => {
                Ok(NewDocument {
                    title,
                    category,
                    file_url,
                    mime_type: mime_type.to_ascii_lowercase(),
                    size_bytes,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /ocr-jobs/{id}/complete`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOcrJobRequest {
    /// Extracted text.
    pub extracted_text: Option<String>,
    /// Confidence percentage, 0-100.
    pub confidence: Option<LooseValue>,
}

impl Validate for CompleteOcrJobRequest {
    type Output = OcrOutcome;

    fn validate(self) -> Result<OcrOutcome, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let extracted_text = errs.required_text("extractedText", self.extracted_text.as_deref());
        let confidence = errs.decimal_in_range(
            "confidence",
            self.confidence.as_ref(),
            Decimal::ZERO,
            Decimal::ONE_HUNDRED,
        );
        match (extracted_text, confidence) {
            (Some(extracted_text), Some(confidence)) => Ok(OcrOutcome::Completed {
                extracted_text,
                confidence,
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /ocr-jobs/{id}/fail`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailOcrJobRequest {
    /// What went wrong.
    pub error_message: Option<String>,
}

impl Validate for FailOcrJobRequest {
    type Output = OcrOutcome;

    fn validate(self) -> Result<OcrOutcome, ValidationErrors> {
        let mut errs = FieldErrors::new();
        match errs.required_text("errorMessage", self.error_message.as_deref()) {
            Some(error_message) => Ok(OcrOutcome::Failed { error_message }),
            None => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_register_document() {
        let doc = RegisterDocumentRequest {
            title: Some("Invoice INV-0042".into()),
            category: Some("invoice".into()),
            file_url: Some("https://files.example.com/inv-0042.pdf".into()),
            mime_type: Some("Application/PDF".into()),
            size_bytes: Some("20480".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(doc.category, DocumentCategory::Invoice);
        assert_eq!(doc.mime_type, "application/pdf");
        assert_eq!(doc.size_bytes, Some(20480));
    }

    #[test]
    fn test_confidence_range() {
        let errs = CompleteOcrJobRequest {
            extracted_text: Some("text".into()),
            confidence: Some("120".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("confidence"), Some("max"));

        let outcome = CompleteOcrJobRequest {
            extracted_text: Some("text".into()),
            confidence: Some("88.4".into()),
        }
        .validate()
        .unwrap();
        assert!(matches!(outcome, OcrOutcome::Completed { confidence, .. } if confidence == dec!(88.4)));
    }

    #[test]
    fn test_fail_requires_message() {
        let errs = FailOcrJobRequest::default().validate().unwrap_err();
        assert_eq!(errs.code_for("errorMessage"), Some("required"));
    }
}
