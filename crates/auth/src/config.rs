//! Session/cookie settings.
//!
//! Built once at startup and handed to [`SessionAuthenticator::new`](crate::SessionAuthenticator::new).
//! Nothing in this crate reads the environment on its own.

use thiserror::Error;
use zeroize::Zeroizing;

use crate::cookie::SameSite;

/// Placeholder secret used when none is configured. Never acceptable in production.
pub const INSECURE_DEFAULT_SECRET: &str = "CHANGE_ME_SUPER_SECRET";

pub const DEFAULT_COOKIE_NAME: &str = "session";
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Symmetric signing key.
///
/// `Debug` never prints the key, and the bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Settings for signing and transporting the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Key used to sign session tokens.
    pub secret_key: SecretKey,

    /// Name of the cookie carrying the token.
    pub cookie_name: String,

    /// Token TTL in seconds. Enforced on every verification, not only via
    /// the cookie's `Max-Age`.
    pub max_age: u64,

    /// Emit the `Secure` attribute (HTTPS only).
    pub secure: bool,

    pub same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: SecretKey::new(INSECURE_DEFAULT_SECRET),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age: DEFAULT_MAX_AGE_SECS,
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Load from process environment variables (`SECRET_KEY`, `COOKIE_NAME`,
    /// `COOKIE_MAX_AGE`, `COOKIE_SECURE`, `COOKIE_SAMESITE`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secret) = lookup("SECRET_KEY") {
            if secret.is_empty() {
                return Err(ConfigError::invalid("SECRET_KEY", "must not be empty"));
            }
            config.secret_key = SecretKey::new(secret);
        }

        if let Some(name) = lookup("COOKIE_NAME") {
            let name = name.trim();
            validate_cookie_name(name)?;
            config.cookie_name = name.to_string();
        }

        if let Some(max_age) = lookup("COOKIE_MAX_AGE") {
            config.max_age = max_age.trim().parse().map_err(|e| {
                ConfigError::invalid("COOKIE_MAX_AGE", format!("'{max_age}': {e}"))
            })?;
        }

        if let Some(secure) = lookup("COOKIE_SECURE") {
            config.secure = parse_bool(&secure)
                .ok_or_else(|| ConfigError::invalid("COOKIE_SECURE", format!("'{secure}' is not a boolean")))?;
        }

        if let Some(same_site) = lookup("COOKIE_SAMESITE") {
            config.same_site = same_site
                .parse()
                .map_err(|e: crate::cookie::InvalidSameSite| ConfigError::invalid("COOKIE_SAMESITE", e.to_string()))?;
        }

        if config.uses_insecure_default_secret() {
            tracing::warn!("SECRET_KEY not set; using insecure dev default");
        }
        if config.same_site == SameSite::None && !config.secure {
            tracing::warn!("COOKIE_SAMESITE=none without COOKIE_SECURE; browsers will drop the cookie");
        }

        Ok(config)
    }

    /// True when the placeholder secret is in use.
    pub fn uses_insecure_default_secret(&self) -> bool {
        self.secret_key.as_bytes() == INSECURE_DEFAULT_SECRET.as_bytes()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Cookie names must be non-empty RFC 6265 tokens.
pub(crate) fn validate_cookie_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || !name.chars().all(is_cookie_name_char) {
        return Err(ConfigError::invalid(
            "COOKIE_NAME",
            format!("'{}' is not a valid cookie name", name.escape_debug()),
        ));
    }
    Ok(())
}

fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
}
