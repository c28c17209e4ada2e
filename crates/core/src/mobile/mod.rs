//! Configuration served to the companion mobile app.
//!
//! Every override is optional. Malformed values fall back silently to the
//! defaults so a bad deploy setting never breaks app start-up.

use std::collections::BTreeMap;

use ridgeline_shared::config::MobileConfig;
use serde::Serialize;
use tracing::warn;

use crate::validation::is_http_url;

/// Minimum app version when none is configured.
pub const DEFAULT_MIN_VERSION: &str = "1.0.0";
/// App Store listing.
pub const DEFAULT_IOS_STORE_URL: &str = "https://apps.apple.com/app/ridgeline";
/// Play Store listing.
pub const DEFAULT_ANDROID_STORE_URL: &str =
    "https://play.google.com/store/apps/details?id=com.ridgeline.mobile";

/// Feature flags known to the app, with their defaults.
pub const DEFAULT_FEATURE_FLAGS: &[(&str, bool)] = &[
    ("offlineMode", true),
    ("ocrCapture", true),
    ("fleetInspections", true),
    ("safetyReporting", true),
    ("biometricLogin", false),
];

/// Per-platform pair of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformValues {
    /// iOS value.
    pub ios: String,
    /// Android value.
    pub android: String,
}

/// Body of `GET /mobile/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileConfigResponse {
    /// Oldest supported app versions.
    pub minimum_versions: PlatformValues,
    /// Store listings for forced upgrades.
    pub store_urls: PlatformValues,
    /// Feature switches.
    pub feature_flags: BTreeMap<String, bool>,
}

/// Resolves raw configuration into the response, applying defaults.
#[must_use]
pub fn resolve(config: &MobileConfig) -> MobileConfigResponse {
    MobileConfigResponse {
        minimum_versions: PlatformValues {
            ios: version_or_default(config.min_version_ios.as_deref()),
            android: version_or_default(config.min_version_android.as_deref()),
        },
        store_urls: PlatformValues {
            ios: url_or_default(config.ios_store_url.as_deref(), DEFAULT_IOS_STORE_URL),
            android: url_or_default(config.android_store_url.as_deref(), DEFAULT_ANDROID_STORE_URL),
        },
        feature_flags: feature_flags(config.feature_flags.as_deref()),
    }
}

/// Returns true for `major.minor.patch` with numeric parts.
#[must_use]
pub fn is_semver(raw: &str) -> bool {
    let parts: Vec<&str> = raw.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

fn version_or_default(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(v) if is_semver(v) => v.to_string(),
        Some(v) if !v.is_empty() => {
            warn!(value = v, "Ignoring malformed mobile minimum version");
            DEFAULT_MIN_VERSION.to_string()
        }
        _ => DEFAULT_MIN_VERSION.to_string(),
    }
}

fn url_or_default(raw: Option<&str>, default: &str) -> String {
    match raw.map(str::trim) {
        Some(u) if is_http_url(u) => u.to_string(),
        Some(u) if !u.is_empty() => {
            warn!(value = u, "Ignoring malformed mobile store URL");
            default.to_string()
        }
        _ => default.to_string(),
    }
}

fn feature_flags(raw: Option<&str>) -> BTreeMap<String, bool> {
    let mut flags: BTreeMap<String, bool> = DEFAULT_FEATURE_FLAGS
        .iter()
        .map(|(k, v)| ((*k).to_string(), *v))
        .collect();

    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return flags;
    };
    let overrides = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            warn!("Ignoring mobile feature flags that are not a JSON object");
            return flags;
        }
    };

    for (key, value) in overrides {
        match (flags.get_mut(&key), value) {
            (Some(slot), serde_json::Value::Bool(b)) => *slot = b,
            (Some(_), _) => warn!(flag = %key, "Ignoring non-boolean mobile feature flag"),
            (None, _) => {}
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let resolved = resolve(&MobileConfig::default());
        assert_eq!(resolved.minimum_versions.ios, "1.0.0");
        assert_eq!(resolved.minimum_versions.android, "1.0.0");
        assert_eq!(resolved.store_urls.ios, DEFAULT_IOS_STORE_URL);
        assert_eq!(resolved.feature_flags.len(), DEFAULT_FEATURE_FLAGS.len());
        assert!(resolved.feature_flags["offlineMode"]);
    }

    #[test]
    fn test_valid_overrides() {
        let cfg = MobileConfig {
            min_version_ios: Some("2.4.1".into()),
            min_version_android: Some(" 2.3.0 ".into()),
            ios_store_url: Some("https://apps.apple.com/app/id123".into()),
            android_store_url: None,
            feature_flags: Some(r#"{"biometricLogin": true, "offlineMode": false}"#.into()),
        };
        let resolved = resolve(&cfg);
        assert_eq!(resolved.minimum_versions.ios, "2.4.1");
        assert_eq!(resolved.minimum_versions.android, "2.3.0");
        assert_eq!(resolved.store_urls.ios, "https://apps.apple.com/app/id123");
        assert_eq!(resolved.store_urls.android, DEFAULT_ANDROID_STORE_URL);
        assert!(resolved.feature_flags["biometricLogin"]);
        assert!(!resolved.feature_flags["offlineMode"]);
    }

    #[rstest]
    #[case("2.4")]
    #[case("v2.4.1")]
    #[case("2.4.x")]
    #[case("2..1")]
    fn test_malformed_version_falls_back(#[case] raw: &str) {
        let cfg = MobileConfig {
            min_version_ios: Some(raw.into()),
            ..MobileConfig::default()
        };
        assert_eq!(resolve(&cfg).minimum_versions.ios, DEFAULT_MIN_VERSION);
    }

    #[test]
    fn test_non_http_url_falls_back() {
        let cfg = MobileConfig {
            android_store_url: Some("market://details?id=x".into()),
            ..MobileConfig::default()
        };
        assert_eq!(resolve(&cfg).store_urls.android, DEFAULT_ANDROID_STORE_URL);
    }

    #[rstest]
    #[case("not json")]
    #[case("[true]")]
    fn test_invalid_flag_json_falls_back(#[case] raw: &str) {
        let cfg = MobileConfig {
            feature_flags: Some(raw.into()),
            ..MobileConfig::default()
        };
        assert_eq!(resolve(&cfg), resolve(&MobileConfig::default()));
    }

    #[test]
    fn test_non_bool_and_unknown_flags_ignored() {
        let cfg = MobileConfig {
            feature_flags: Some(r#"{"ocrCapture": "no", "teleport": true}"#.into()),
            ..MobileConfig::default()
        };
        let flags = resolve(&cfg).feature_flags;
        assert!(flags["ocrCapture"]);
        assert!(!flags.contains_key("teleport"));
    }

    #[test]
    fn test_response_is_camel_case() {
        let json = serde_json::to_value(resolve(&MobileConfig::default())).unwrap();
        assert!(json.get("minimumVersions").is_some());
        assert!(json.get("storeUrls").is_some());
        assert!(json.get("featureFlags").is_some());
    }
}
