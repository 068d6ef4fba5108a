//! Cookie directives handed to the HTTP layer.
//!
//! The authenticator never touches a response itself. It produces a
//! [`CookieDirective`] and whatever carries the token renders it, usually as
//! a `Set-Cookie` header via [`CookieDirective::to_header_value`].

use core::str::FromStr;

use thiserror::Error;

/// `SameSite` cookie policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

impl core::fmt::Display for SameSite {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid SameSite policy '{0}' (expected lax|strict|none)")]
pub struct InvalidSameSite(String);

impl FromStr for SameSite {
    type Err = InvalidSameSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" => Ok(SameSite::None),
            _ => Err(InvalidSameSite(s.to_string())),
        }
    }
}

/// Instruction to set or remove the session cookie on the client.
///
/// Both variants are `HttpOnly` and scoped to `Path=/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieDirective {
    Set {
        name: String,
        value: String,
        max_age: u64,
        secure: bool,
        same_site: SameSite,
    },
    Clear {
        name: String,
        secure: bool,
        same_site: SameSite,
    },
}

impl CookieDirective {
    pub fn name(&self) -> &str {
        match self {
            CookieDirective::Set { name, .. } | CookieDirective::Clear { name, .. } => name,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, CookieDirective::Clear { .. })
    }

    /// Render as the value of a `Set-Cookie` header.
    pub fn to_header_value(&self) -> String {
        let (mut cookie, secure, same_site) = match self {
            CookieDirective::Set {
                name,
                value,
                max_age,
                secure,
                same_site,
            } => (format!("{name}={value}; Max-Age={max_age}"), *secure, *same_site),
            CookieDirective::Clear {
                name,
                secure,
                same_site,
            } => (
                format!("{name}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT"),
                *secure,
                *same_site,
            ),
        };

        cookie.push_str("; Path=/; HttpOnly");
        if secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(same_site.as_str());
        cookie
    }
}

impl core::fmt::Display for CookieDirective {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_header_value())
    }
}
