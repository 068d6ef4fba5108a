//! Stateless signed-cookie sessions.
//!
//! The token is the whole session: `issue` signs the subject together with
//! the issue time, `verify` checks signature and TTL on every request. There
//! is no server-side session table.

use core::fmt::Display;
use core::str::FromStr;

use chrono::{DateTime, Utc};

use crate::config::validate_cookie_name;
use crate::{AuthConfig, AuthError, ConfigError, CookieDirective, SameSite, SignatureError, TimestampSigner};

/// Issues, verifies and clears signed session tokens.
///
/// Holds only immutable state, so a single instance can be shared across
/// request tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    signer: TimestampSigner,
    cookie_name: String,
    max_age: u64,
    secure: bool,
    same_site: SameSite,
}

/// Result of a logout: the subject (when the presented token was still
/// valid) and the directive that removes the cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logout<S> {
    pub subject: Option<S>,
    pub directive: CookieDirective,
}

impl SessionAuthenticator {
    /// # Errors
    /// [`ConfigError::Invalid`] when `config.cookie_name` is not a valid cookie
    /// name. Checked here as well as in [`AuthConfig::from_lookup`] so that a
    /// hand-built config cannot produce directives the HTTP layer must reject.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        validate_cookie_name(&config.cookie_name)?;

        Ok(Self {
            signer: TimestampSigner::new(&config.secret_key),
            cookie_name: config.cookie_name.clone(),
            max_age: config.max_age,
            secure: config.secure,
            same_site: config.same_site,
        })
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Sign `subject` with the current time.
    pub fn issue<S: Display>(&self, subject: &S) -> String {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at<S: Display>(&self, subject: &S, now: DateTime<Utc>) -> String {
        self.signer.sign(&subject.to_string(), now)
    }

    /// Verify a presented token against the current time.
    pub fn verify<S: FromStr>(&self, token: Option<&str>) -> Result<S, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a presented token as of `now`.
    ///
    /// # Errors
    /// - [`AuthError::MissingCredential`]: no token, or an empty one
    /// - [`AuthError::ExpiredCredential`]: authentic but older than `max_age`
    /// - [`AuthError::InvalidCredential`]: bad signature, malformed token, or
    ///   a payload that does not parse as `S`
    pub fn verify_at<S: FromStr>(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<S, AuthError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::MissingCredential),
        };

        let raw = self
            .signer
            .unsign(token, self.max_age, now)
            .map_err(|e| {
                tracing::debug!(reason = %e, "session token rejected");
                match e {
                    SignatureError::Expired { .. } => AuthError::ExpiredCredential,
                    SignatureError::Malformed | SignatureError::BadSignature => {
                        AuthError::InvalidCredential
                    }
                }
            })?;

        raw.parse().map_err(|_| {
            tracing::debug!("session payload is not a valid subject");
            AuthError::InvalidCredential
        })
    }

    /// Directive that stores a freshly issued token for `subject`.
    pub fn session_cookie<S: Display>(&self, subject: &S) -> CookieDirective {
        self.session_cookie_at(subject, Utc::now())
    }

    pub fn session_cookie_at<S: Display>(&self, subject: &S, now: DateTime<Utc>) -> CookieDirective {
        CookieDirective::Set {
            name: self.cookie_name.clone(),
            value: self.issue_at(subject, now),
            max_age: self.max_age,
            secure: self.secure,
            same_site: self.same_site,
        }
    }

    /// Directive that removes the session cookie. Always succeeds.
    pub fn clear(&self) -> CookieDirective {
        CookieDirective::Clear {
            name: self.cookie_name.clone(),
            secure: self.secure,
            same_site: self.same_site,
        }
    }

    /// End a session.
    ///
    /// The token is verified only to learn who is logging out; any
    /// verification failure is dropped and the cookie is cleared regardless.
    pub fn logout<S: FromStr>(&self, token: Option<&str>) -> Logout<S> {
        self.logout_at(token, Utc::now())
    }

    pub fn logout_at<S: FromStr>(&self, token: Option<&str>, now: DateTime<Utc>) -> Logout<S> {
        let subject = self.verify_at(token, now).ok();
        Logout {
            subject,
            directive: self.clear(),
        }
    }
}
