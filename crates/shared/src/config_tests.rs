use crate::config::{AppConfig, WebhookConfig};

#[test]
fn test_load_applies_defaults() {
    temp_env::with_vars(
        [
            ("RIDGELINE__DATABASE__URL", Some("postgres://localhost/ridgeline")),
            ("RIDGELINE__JWT__SECRET", Some("s3cret")),
        ],
        || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.database.url, "postgres://localhost/ridgeline");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.database.max_connections, 10);
            assert_eq!(config.procurement.match_tolerance_percent, "5");
            assert!(config.webhook.notify_on_completed);
            assert_eq!(config.webhook.timeout_secs, 10);
            assert!(config.webhook.destinations().is_empty());
            assert!(config.mobile.min_version_ios.is_none());
        },
    );
}

#[test]
fn test_load_reads_nested_overrides() {
    temp_env::with_vars(
        [
            ("RIDGELINE__DATABASE__URL", Some("postgres://localhost/ridgeline")),
            ("RIDGELINE__JWT__SECRET", Some("s3cret")),
            ("RIDGELINE__WEBHOOK__URLS", Some("https://a.example/hook")),
            ("RIDGELINE__MOBILE__MIN_VERSION_IOS", Some("2.4.0")),
        ],
        || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.webhook.destinations(), vec!["https://a.example/hook"]);
            assert_eq!(config.mobile.min_version_ios.as_deref(), Some("2.4.0"));
        },
    );
}

#[test]
fn test_load_fails_without_database_url() {
    temp_env::with_vars(
        [
            ("RIDGELINE__DATABASE__URL", None::<&str>),
            ("RIDGELINE__JWT__SECRET", Some("s3cret")),
        ],
        || {
            assert!(AppConfig::load().is_err());
        },
    );
}

#[test]
fn test_webhook_destinations_split_and_trim() {
    let config = WebhookConfig {
        urls: " https://a.example/hook, ,https://b.example/ocr ".to_string(),
        ..WebhookConfig::default()
    };
    assert_eq!(
        config.destinations(),
        vec!["https://a.example/hook", "https://b.example/ocr"]
    );
}
