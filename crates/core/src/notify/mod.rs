//! Outbound OCR webhooks.
//!
//! Payloads are serialized once, signed with HMAC-SHA256 and posted to every
//! configured destination by a background worker. Delivery is best-effort:
//! failures are logged and dropped.

pub mod dispatcher;
pub mod payload;
pub mod signature;

pub use dispatcher::{WebhookDispatcher, WebhookError};
pub use payload::{OcrEvent, OcrWebhookPayload};
pub use signature::{SIGNATURE_HEADER, WebhookSigner};
