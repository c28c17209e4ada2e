//! Bearer token verification.
//!
//! Access tokens come from the identity service, signed HS256 with a secret
//! shared with this backend. Only HS256 is accepted. `issue` exists so
//! tooling and tests can mint tokens against the same secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;

/// Clock skew tolerated on `exp`, in seconds.
const LEEWAY_SECS: u64 = 30;

/// Signing parameters.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret.
    pub secret: String,
    /// Lifetime of minted tokens, in minutes.
    pub access_token_expires_minutes: i64,
}

impl From<&crate::config::JwtConfig> for JwtConfig {
    fn from(config: &crate::config::JwtConfig) -> Self {
        let minutes = i64::try_from(config.access_token_expiry_secs / 60).unwrap_or(i64::MAX);
        Self {
            secret: config.secret.clone(),
            access_token_expires_minutes: minutes.max(1),
        }
    }
}

/// Why a token was refused or could not be minted.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Minting failed.
    #[error("could not sign token: {0}")]
    Signing(String),

    /// Bad signature, wrong algorithm or malformed payload.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// Past `exp` (beyond the leeway).
    #[error("token has expired")]
    Expired,

    /// Signed correctly but carries no role.
    #[error("token has no role claim")]
    MissingRole,
}

/// Verifies (and for tests, mints) access tokens.
#[derive(Clone)]
pub struct JwtService {
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("lifetime_minutes", &self.lifetime.num_minutes())
            .field("secret", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Builds the service from its signing parameters.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            lifetime: Duration::minutes(config.access_token_expires_minutes),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mints a token for `user_id` holding `role`.
    pub fn issue(&self, user_id: Uuid, name: &str, role: &str) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, name, role, Utc::now() + self.lifetime);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Checks signature, algorithm and expiry, then returns the claims.
    ///
    /// # Errors
    ///
    /// - `Expired` once `exp` plus the leeway has passed
    /// - `MissingRole` when the role claim is blank
    /// - `Invalid` for anything else
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })?;

        if claims.role.trim().is_empty() {
            return Err(JwtError::MissingRole);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(minutes: i64) -> JwtService {
        JwtService::new(JwtConfig {
            secret: "pit-two-shared-secret".to_string(),
            access_token_expires_minutes: minutes,
        })
    }

    #[test]
    fn test_issued_token_verifies() {
        let jwt = service(15);
        let user_id = Uuid::new_v4();

        let token = jwt.issue(user_id, "Thandi Mokoena", "STOREKEEPER").unwrap();
        let claims = jwt.verify(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.name, "Thandi Mokoena");
        assert_eq!(claims.role, "STOREKEEPER");
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            service(15).verify("not.a.token"),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_foreign_secret_is_invalid() {
        let token = JwtService::new(JwtConfig {
            secret: "someone-else".to_string(),
            access_token_expires_minutes: 15,
        })
        .issue(Uuid::new_v4(), "x", "CEO")
        .unwrap();

        assert!(matches!(service(15).verify(&token), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_expired_beyond_leeway() {
        let jwt = service(-10);
        let token = jwt.issue(Uuid::new_v4(), "x", "CEO").unwrap();
        assert!(matches!(jwt.verify(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_blank_role_is_refused() {
        let jwt = service(15);
        let token = jwt.issue(Uuid::new_v4(), "x", "  ").unwrap();
        assert!(matches!(jwt.verify(&token), Err(JwtError::MissingRole)));
    }

    #[test]
    fn test_config_minutes_floor_at_one() {
        let config = crate::config::JwtConfig {
            secret: "s".to_string(),
            access_token_expiry_secs: 30,
        };
        assert_eq!(JwtConfig::from(&config).access_token_expires_minutes, 1);
    }
}
