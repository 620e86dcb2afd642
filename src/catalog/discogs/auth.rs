//! Discogs credential handling
//!
//! The app is configured with a single opaque string. Discogs accepts either a
//! consumer key/secret pair or a personal access token, both as query
//! parameters, so the string is dispatched on its shape.

use std::fmt;

/// How requests authenticate against Discogs
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `key:secret` consumer credentials, sent as `key` and `secret`
    KeySecret { key: String, secret: String },
    /// Personal access token, sent as `token`
    Token(String),
}

impl AuthScheme {
    /// Parse the configured credential string.
    ///
    /// Splitting on `:` ignores empty pieces; exactly two pieces means a
    /// key/secret pair, anything else is sent verbatim as a token.
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split(':').filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [key, secret] => AuthScheme::KeySecret {
                key: (*key).to_string(),
                secret: (*secret).to_string(),
            },
            _ => AuthScheme::Token(raw.to_string()),
        }
    }

    /// Query parameters carrying the credentials
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            AuthScheme::KeySecret { key, secret } => {
                vec![("key", key.as_str()), ("secret", secret.as_str())]
            }
            AuthScheme::Token(token) => vec![("token", token.as_str())],
        }
    }
}

impl fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::KeySecret { .. } => f.write_str("KeySecret { .. }"),
            AuthScheme::Token(_) => f.write_str("Token(..)"),
        }
    }
}
