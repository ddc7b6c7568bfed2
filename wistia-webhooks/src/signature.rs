//! Webhook signature computation and verification
//!
//! Wistia signs every delivery with an HMAC-SHA256 of the raw POST body, keyed
//! by the secret configured for the webhook, and sends the lowercase hex digest
//! in the `X-Wistia-Signature` header. Verify before parsing; the delivery
//! parser performs no authentication of its own.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of a hex-encoded HMAC-SHA256 digest
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Compute the signature Wistia would send for `body`.
///
/// Returns the lowercase hex HMAC-SHA256 digest, always 64 characters.
///
/// ```
/// use wistia_webhooks::compute_signature;
///
/// let sig = compute_signature(b"{}", "secret");
/// assert_eq!(sig.len(), 64);
/// ```
pub fn compute_signature(body: &[u8], secret_key: &str) -> String {
    let mut mac = keyed_mac(secret_key);
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a claimed signature against `body`.
///
/// The comparison is constant-time. A mismatch, or a claimed value that is not
/// a lowercase hex digest, returns `false` rather than an error.
///
/// ```
/// use wistia_webhooks::{compute_signature, verify_signature};
///
/// let body = br#"{"hook":{"uuid":"a4ab9eb6-ab82-4dae-86f2-29f744f7d031"},"events":[]}"#;
/// let sig = compute_signature(body, "secret");
///
/// assert!(verify_signature(body, &sig, "secret"));
/// assert!(!verify_signature(body, &sig, "other-secret"));
/// ```
pub fn verify_signature(body: &[u8], claimed_signature: &str, secret_key: &str) -> bool {
    // The header is specified as lowercase hex; hex::decode alone would also
    // accept uppercase.
    if claimed_signature.bytes().any(|b| b.is_ascii_uppercase()) {
        return false;
    }

    let claimed = match hex::decode(claimed_signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = keyed_mac(secret_key);
    mac.update(body);

    // Constant-time comparison via the HMAC library
    mac.verify_slice(&claimed).is_ok()
}

fn keyed_mac(secret_key: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret_key.as_bytes()).expect("HMAC can take any size key")
}

/// Header names used by Wistia webhook deliveries
pub mod headers {
    /// Hex HMAC-SHA256 of the raw body
    pub const SIGNATURE: &str = "X-Wistia-Signature";

    /// `Wistia-Webhooks/{VERSION}`
    pub const USER_AGENT: &str = "User-Agent";
}
