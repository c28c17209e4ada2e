//! Queue-backed webhook delivery.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use ridgeline_shared::config::WebhookConfig;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use super::payload::{OcrEvent, OcrWebhookPayload};
use super::signature::{SIGNATURE_HEADER, WebhookSigner};

/// Errors raised while setting up the dispatcher.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The HTTP client could not be built.
    #[error("Failed to build webhook client: {0}")]
    Client(String),

    /// The signing secret could not key the HMAC.
    #[error("Invalid webhook signing secret: {0}")]
    Secret(String),
}

/// One signed POST to one destination.
#[derive(Debug)]
struct Delivery {
    url: String,
    body: Arc<str>,
    signature: String,
    event: OcrEvent,
}

/// Queue and signer behind an enabled dispatcher.
#[derive(Debug, Clone)]
struct Outbox {
    tx: mpsc::Sender<Delivery>,
    signer: WebhookSigner,
}

/// Enqueues signed OCR notifications for background delivery.
///
/// Cloning is cheap; all clones feed the same worker.
#[derive(Debug, Clone)]
pub struct WebhookDispatcher {
    outbox: Option<Outbox>,
    destinations: Arc<[String]>,
    notify_on_completed: bool,
    notify_on_failed: bool,
}

impl WebhookDispatcher {
    /// Starts the delivery worker on the current Tokio runtime.
    ///
    /// With no destinations configured, returns a dispatcher that never sends.
    pub fn spawn(config: &WebhookConfig) -> Result<Self, WebhookError> {
        let destinations = config.destinations();
        if destinations.is_empty() {
            return Ok(Self::disabled());
        }

        let signer =
            WebhookSigner::new(&config.secret).map_err(|e| WebhookError::Secret(e.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WebhookError::Client(e.to_string()))?;

        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        tokio::spawn(run_worker(client, rx));

        Ok(Self {
            outbox: Some(Outbox { tx, signer }),
            destinations: destinations.into(),
            notify_on_completed: config.notify_on_completed,
            notify_on_failed: config.notify_on_failed,
        })
    }

    /// A dispatcher that drops every notification.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            outbox: None,
            destinations: Arc::from(Vec::new()),
            notify_on_completed: false,
            notify_on_failed: false,
        }
    }

    /// Returns true when `event` would be delivered anywhere.
    #[must_use]
    pub fn is_enabled_for(&self, event: OcrEvent) -> bool {
        let wanted = match event {
            OcrEvent::Completed => self.notify_on_completed,
            OcrEvent::Failed => self.notify_on_failed,
        };
        wanted && self.outbox.is_some() && !self.destinations.is_empty()
    }

    /// Queues `payload` for every destination. Never blocks and never fails.
    pub fn notify(&self, payload: &OcrWebhookPayload) {
        if !self.is_enabled_for(payload.event) {
            return;
        }
        let Some(outbox) = &self.outbox else {
            return;
        };

        let body: Arc<str> = match serde_json::to_string(payload) {
            Ok(body) => body.into(),
            Err(e) => {
                warn!(error = %e, job_id = %payload.job_id, "Failed to serialize webhook payload");
                return;
            }
        };
        let signature = outbox.signer.header_value(body.as_bytes());

        for url in self.destinations.iter() {
            let delivery = Delivery {
                url: url.clone(),
                body: Arc::clone(&body),
                signature: signature.clone(),
                event: payload.event,
            };
            match outbox.tx.try_send(delivery) {
                Ok(()) => {}
                Err(TrySendError::Full(d)) => {
                    warn!(url = %d.url, event = d.event.as_str(), "Webhook queue full, dropping delivery");
                }
                Err(TrySendError::Closed(d)) => {
                    warn!(url = %d.url, event = d.event.as_str(), "Webhook worker stopped, dropping delivery");
                }
            }
        }
    }
}

async fn run_worker(client: Client, mut rx: mpsc::Receiver<Delivery>) {
    while let Some(delivery) = rx.recv().await {
        let client = client.clone();
        tokio::spawn(deliver(client, delivery));
    }
    debug!("Webhook worker shutting down");
}

async fn deliver(client: Client, delivery: Delivery) {
    let result = client
        .post(&delivery.url)
        .header(CONTENT_TYPE, "application/json")
        .header(SIGNATURE_HEADER, &delivery.signature)
        .body(delivery.body.to_string())
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => {
            debug!(url = %delivery.url, event = delivery.event.as_str(), "Webhook delivered");
        }
        Ok(resp) => {
            warn!(
                url = %delivery.url,
                event = delivery.event.as_str(),
                status = resp.status().as_u16(),
                "Webhook destination rejected delivery"
            );
        }
        Err(e) => {
            warn!(url = %delivery.url, event = delivery.event.as_str(), error = %e, "Webhook delivery failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::OcrOutcome;
    use axum::Router;
    use axum::http::HeaderMap;
    use axum::routing::post;
    use chrono::Utc;
    use uuid::Uuid;

    fn config(urls: String) -> WebhookConfig {
        WebhookConfig {
            urls,
            secret: "test-secret".into(),
            ..WebhookConfig::default()
        }
    }

    fn failed_payload() -> OcrWebhookPayload {
        OcrWebhookPayload::for_outcome(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &OcrOutcome::Failed {
                error_message: "unreadable".into(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_disabled_dispatcher_is_silent() {
        let d = WebhookDispatcher::disabled();
        assert!(!d.is_enabled_for(OcrEvent::Completed));
        d.notify(&failed_payload());
    }

    #[tokio::test]
    async fn test_no_destinations_disables() {
        let d = WebhookDispatcher::spawn(&config("  , ".into())).unwrap();
        assert!(!d.is_enabled_for(OcrEvent::Failed));
    }

    #[tokio::test]
    async fn test_event_toggles() {
        let cfg = WebhookConfig {
            notify_on_failed: false,
            ..config("http://127.0.0.1:9/hook".into())
        };
        let d = WebhookDispatcher::spawn(&cfg).unwrap();
        assert!(d.is_enabled_for(OcrEvent::Completed));
        assert!(!d.is_enabled_for(OcrEvent::Failed));
    }

    #[tokio::test]
    async fn test_delivers_signed_body() {
        let (seen_tx, mut seen_rx) = mpsc::channel::<(String, String)>(1);
        let app = Router::new().route(
            "/hook",
            post(move |headers: HeaderMap, body: String| {
                let seen_tx = seen_tx.clone();
                async move {
                    let sig = headers
                        .get(SIGNATURE_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let _ = seen_tx.send((sig, body)).await;
                    "ok"
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let d = WebhookDispatcher::spawn(&config(format!("http://{addr}/hook"))).unwrap();
        let payload = failed_payload();
        d.notify(&payload);

        let (sig, body) = tokio::time::timeout(Duration::from_secs(5), seen_rx.recv())
            .await
            .unwrap()
            .unwrap();
        let expected = WebhookSigner::new("test-secret").unwrap().header_value(body.as_bytes());
        assert_eq!(sig, expected);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["event"], "ocr.failed");
        assert_eq!(json["jobId"], payload.job_id.to_string());
    }
}
