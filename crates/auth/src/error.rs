use thiserror::Error;

/// Why a presented session credential was not accepted.
///
/// This is the only error verification surfaces; signing-library details
/// are folded into [`AuthError::InvalidCredential`].
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no session credential")]
    MissingCredential,

    #[error("session expired")]
    ExpiredCredential,

    #[error("invalid session")]
    InvalidCredential,
}

impl AuthError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::ExpiredCredential => "expired_credential",
            AuthError::InvalidCredential => "invalid_credential",
        }
    }
}
