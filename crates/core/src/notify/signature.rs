//! HMAC-SHA256 request signing.

use std::fmt;

use hmac::{Hmac, Mac, digest::InvalidLength};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "X-OCR-Signature";

/// Signs webhook bodies with a shared secret.
///
/// The key is checked once when the signer is built; signing itself cannot fail.
#[derive(Clone)]
pub struct WebhookSigner {
    keyed: HmacSha256,
}

impl WebhookSigner {
    /// Keys a signer with `secret`.
    pub fn new(secret: &str) -> Result<Self, InvalidLength> {
        Ok(Self {
            keyed: HmacSha256::new_from_slice(secret.as_bytes())?,
        })
    }

    /// Returns the lowercase hex HMAC-SHA256 of `body`.
    #[must_use]
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = self.keyed.clone();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Returns the `sha256=<hex>` header value for `body`.
    #[must_use]
    pub fn header_value(&self, body: &[u8]) -> String {
        format!("sha256={}", self.sign(body))
    }
}

impl fmt::Debug for WebhookSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(secret: &str) -> WebhookSigner {
        WebhookSigner::new(secret).unwrap()
    }

    #[test]
    fn test_known_vector() {
        assert_eq!(
            signer("key").sign(b"The quick brown fox jumps over the lazy dog"),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_header_value_prefix() {
        let value = signer("secret").header_value(b"{}");
        assert!(value.starts_with("sha256="));
        assert_eq!(value.len(), "sha256=".len() + 64);
    }

    #[test]
    fn test_signature_depends_on_secret() {
        assert_ne!(signer("a").sign(b"body"), signer("b").sign(b"body"));
    }

    #[test]
    fn test_signer_is_reusable() {
        let s = signer("key");
        assert_eq!(s.sign(b"first"), s.sign(b"first"));
        assert_ne!(s.sign(b"first"), s.sign(b"second"));
    }

    #[test]
    fn test_empty_and_long_secrets_are_accepted() {
        assert!(WebhookSigner::new("").is_ok());
        assert!(WebhookSigner::new(&"k".repeat(512)).is_ok());
    }
}
