//! Timestamped HMAC signing of opaque string values.
//!
//! A signed value looks like `<value>.<timestamp>.<signature>`:
//! - `value` is the UTF-8 input, URL-safe base64 (no padding);
//! - `timestamp` is the issue time in whole seconds since the Unix epoch,
//!   big-endian with leading zero bytes stripped, URL-safe base64 (no padding);
//! - `signature` is `HMAC-SHA256(derived_key, "<value>.<timestamp>")`, URL-safe
//!   base64 (no padding).
//!
//! Every part is base64url, so a signed value is safe to place in a cookie or
//! header whatever the input contains.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

use crate::config::SecretKey;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '.';

/// Salt mixed into the key derivation. Changing it invalidates every token.
const DEFAULT_SALT: &[u8] = b"signet.session";

/// Failures of the signing layer.
///
/// These never leave the crate's public session API; the authenticator maps
/// them onto [`AuthError`](crate::AuthError).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("malformed signed value")]
    Malformed,

    #[error("signature does not match")]
    BadSignature,

    #[error("signature age {age}s outside of the accepted window")]
    Expired { age: i64 },
}

/// Signs values together with the time they were signed.
///
/// The keyed HMAC state lives as long as the signer and is not wiped on drop;
/// only the [`SecretKey`] and the intermediate derived key are.
#[derive(Clone)]
pub struct TimestampSigner {
    mac: HmacSha256,
}

impl core::fmt::Debug for TimestampSigner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimestampSigner").finish_non_exhaustive()
    }
}

impl TimestampSigner {
    pub fn new(secret: &SecretKey) -> Self {
        Self::with_salt(secret, DEFAULT_SALT)
    }

    pub fn with_salt(secret: &SecretKey, salt: &[u8]) -> Self {
        // derived = SHA-256(salt || "signer" || secret)
        let mut derived = Sha256::new()
            .chain_update(salt)
            .chain_update(b"signer")
            .chain_update(secret.as_bytes())
            .finalize();

        let mac = HmacSha256::new_from_slice(&derived)
            .expect("HMAC accepts keys of any length");
        derived.as_mut_slice().zeroize();

        Self { mac }
    }

    /// Sign `value`, embedding `now` as the issue time.
    pub fn sign(&self, value: &str, now: DateTime<Utc>) -> String {
        let issued_at = u64::try_from(now.timestamp()).unwrap_or(0);
        let payload = format!(
            "{}{SEPARATOR}{}",
            URL_SAFE_NO_PAD.encode(value),
            encode_timestamp(issued_at)
        );
        let signature = URL_SAFE_NO_PAD.encode(self.signature(&payload));
        format!("{payload}{SEPARATOR}{signature}")
    }

    /// Check the signature and age of `signed` and return the original value.
    ///
    /// The signature is checked before the timestamp is interpreted, so a
    /// tampered value is always reported as [`SignatureError::BadSignature`]
    /// or [`SignatureError::Malformed`], never as expired.
    pub fn unsign(
        &self,
        signed: &str,
        max_age: u64,
        now: DateTime<Utc>,
    ) -> Result<String, SignatureError> {
        let (payload, signature) = signed
            .rsplit_once(SEPARATOR)
            .ok_or(SignatureError::Malformed)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| SignatureError::BadSignature)?;

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SignatureError::BadSignature)?;

        let (value, timestamp) = payload
            .rsplit_once(SEPARATOR)
            .ok_or(SignatureError::Malformed)?;
        let issued_at = decode_timestamp(timestamp)?;

        let age = now.timestamp().saturating_sub(issued_at);
        let max_age = i64::try_from(max_age).unwrap_or(i64::MAX);
        if age < 0 || age > max_age {
            return Err(SignatureError::Expired { age });
        }

        let value = URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|_| SignatureError::Malformed)?;
        String::from_utf8(value).map_err(|_| SignatureError::Malformed)
    }

    fn signature(&self, payload: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

fn encode_timestamp(secs: u64) -> String {
    let bytes = secs.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
    URL_SAFE_NO_PAD.encode(&bytes[first..])
}

fn decode_timestamp(encoded: &str) -> Result<i64, SignatureError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| SignatureError::Malformed)?;
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(SignatureError::Malformed);
    }

    let secs = bytes
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    i64::try_from(secs).map_err(|_| SignatureError::Malformed)
}
