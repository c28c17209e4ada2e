//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Procurement defaults.
    #[serde(default)]
    pub procurement: ProcurementConfig,
    /// OCR webhook notifications.
    #[serde(default)]
    pub webhook: WebhookConfig,
    /// Raw mobile app settings. Malformed values are resolved to defaults later.
    #[serde(default)]
    pub mobile: MobileConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret shared with the identity service.
    pub secret: String,
    /// Access token expiration in seconds (for locally minted tokens).
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Procurement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcurementConfig {
    /// Default three-way match tolerance, in percent.
    #[serde(default = "default_match_tolerance")]
    pub match_tolerance_percent: String,
}

impl Default for ProcurementConfig {
    fn default() -> Self {
        Self {
            match_tolerance_percent: default_match_tolerance(),
        }
    }
}

fn default_match_tolerance() -> String {
    "5".to_string()
}

/// OCR webhook configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Comma-separated destination URLs.
    #[serde(default)]
    pub urls: String,
    /// HMAC signing secret.
    #[serde(default)]
    pub secret: String,
    /// Notify when an OCR job completes.
    #[serde(default = "default_true")]
    pub notify_on_completed: bool,
    /// Notify when an OCR job fails.
    #[serde(default = "default_true")]
    pub notify_on_failed: bool,
    /// Per-request timeout in seconds.
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
    /// Maximum number of queued deliveries.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            urls: String::new(),
            secret: String::new(),
            notify_on_completed: true,
            notify_on_failed: true,
            timeout_secs: default_webhook_timeout(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl WebhookConfig {
    /// Returns the configured destination URLs, trimmed and without blanks.
    #[must_use]
    pub fn destinations(&self) -> Vec<String> {
        self.urls
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from)
            .collect()
    }
}

fn default_true() -> bool {
    true
}

fn default_webhook_timeout() -> u64 {
    10
}

fn default_queue_capacity() -> usize {
    256
}

/// Raw mobile app configuration values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MobileConfig {
    /// Minimum supported iOS app version.
    pub min_version_ios: Option<String>,
    /// Minimum supported Android app version.
    pub min_version_android: Option<String>,
    /// App Store URL.
    pub ios_store_url: Option<String>,
    /// Play Store URL.
    pub android_store_url: Option<String>,
    /// JSON object overriding feature flags.
    pub feature_flags: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RIDGELINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
