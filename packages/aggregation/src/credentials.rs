//! Opaque credential handling with secure memory.
//!
//! Uses the `secrecy` crate so bearer tokens never show up in logs, debug
//! output, or error messages. The library treats the token as fully opaque:
//! it is attached to outgoing requests and never inspected or refreshed.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An already-acquired bearer token for the remote management APIs.
///
/// Acquisition and refresh are the caller's problem; adapters only attach it
/// to requests via [`AccessToken::expose`].
pub struct AccessToken(SecretBox<str>);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the token value for use in an Authorization header.
    ///
    /// Only call this at the point of building a request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for AccessToken {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for AccessToken {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccessToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_not_in_debug() {
        let token = AccessToken::new("eyJ-very-secret-token");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn token_not_in_display() {
        let token = AccessToken::new("eyJ-very-secret-token");
        let display = format!("{}", token);
        assert!(!display.contains("eyJ"));
        assert!(display.contains("[REDACTED]"));
    }

    #[test]
    fn expose_returns_value() {
        let token = AccessToken::new("eyJ-very-secret-token");
        assert_eq!(token.expose(), "eyJ-very-secret-token");
    }
}
