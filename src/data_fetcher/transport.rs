//! Credential classification and transport configuration
//!
//! The upstream platform runs two incompatible API dialects. Which one a
//! session talks to is decided entirely by the shape of the supplied
//! credential: legacy keys carry a recognizable scheme prefix, modern keys
//! are bare tokens. Classification is pure and infallible; unknown shapes
//! default to the modern dialect.

use crate::constants::api;

/// The two upstream API dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Legacy,
    Modern,
}

/// Resolved transport configuration for a session: which base root to hit
/// and what the Authorization header looks like. Immutable for the lifetime
/// of the session.
#[derive(Debug, Clone)]
pub struct ApiAccess {
    pub dialect: Dialect,
    pub base_root: String,
    pub auth_header: String,
}

impl ApiAccess {
    /// Classify a credential string and derive the matching base root and
    /// Authorization header.
    ///
    /// A credential is legacy when it starts, case-insensitively, with the
    /// legacy scheme token followed by whitespace. The header then becomes
    /// `"<scheme> <token-with-prefix-stripped>"`. Everything else is modern:
    /// `"Bearer <token>"`.
    ///
    /// # Example
    /// ```
    /// use quizboard::data_fetcher::transport::{ApiAccess, Dialect};
    ///
    /// let access = ApiAccess::from_credential("abcdef0123456789");
    /// assert_eq!(access.dialect, Dialect::Modern);
    /// assert_eq!(access.auth_header, "Bearer abcdef0123456789");
    /// ```
    pub fn from_credential(credential: &str) -> Self {
        Self::with_roots(credential, api::LEGACY_ROOT, api::MODERN_ROOT)
    }

    /// Same classification with explicit roots, for configuration overrides
    /// and tests against mock servers.
    pub fn with_roots(credential: &str, legacy_root: &str, modern_root: &str) -> Self {
        let trimmed = credential.trim();
        match strip_legacy_scheme(trimmed) {
            Some(token) => Self {
                dialect: Dialect::Legacy,
                base_root: legacy_root.to_string(),
                auth_header: format!("{} {token}", api::LEGACY_SCHEME),
            },
            None => Self {
                dialect: Dialect::Modern,
                base_root: modern_root.to_string(),
                auth_header: format!("Bearer {trimmed}"),
            },
        }
    }
}

/// Returns the token portion when the credential carries the legacy scheme
/// prefix, preserving the token's original casing.
fn strip_legacy_scheme(credential: &str) -> Option<&str> {
    let scheme_len = api::LEGACY_SCHEME.len();
    if credential.len() <= scheme_len {
        return None;
    }
    let (prefix, rest) = credential.split_at(scheme_len);
    if !prefix.eq_ignore_ascii_case(api::LEGACY_SCHEME) {
        return None;
    }
    // The scheme must be a whole word: require whitespace after it
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let token = rest.trim_start();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_credential_classification() {
        let access = ApiAccess::from_credential("ApiKey-v1 abc123456789012345");
        assert_eq!(access.dialect, Dialect::Legacy);
        assert_eq!(access.base_root, api::LEGACY_ROOT);
        assert_eq!(access.auth_header, "ApiKey-v1 abc123456789012345");
    }

    #[test]
    fn test_legacy_prefix_is_case_insensitive() {
        let access = ApiAccess::from_credential("APIKEY-V1 secrettoken");
        assert_eq!(access.dialect, Dialect::Legacy);
        // Scheme is normalized, token casing preserved
        assert_eq!(access.auth_header, "ApiKey-v1 secrettoken");
    }

    #[test]
    fn test_modern_credential_classification() {
        let access = ApiAccess::from_credential("abcdef0123456789");
        assert_eq!(access.dialect, Dialect::Modern);
        assert_eq!(access.base_root, api::MODERN_ROOT);
        assert_eq!(access.auth_header, "Bearer abcdef0123456789");
    }

    #[test]
    fn test_prefix_without_separator_is_modern() {
        // "ApiKey-v1abc" does not carry the scheme as a whole word
        let access = ApiAccess::from_credential("ApiKey-v1abc");
        assert_eq!(access.dialect, Dialect::Modern);
        assert_eq!(access.auth_header, "Bearer ApiKey-v1abc");
    }

    #[test]
    fn test_bare_scheme_is_modern() {
        // Scheme with no token degrades to modern rather than erroring
        let access = ApiAccess::from_credential("ApiKey-v1 ");
        assert_eq!(access.dialect, Dialect::Modern);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let access = ApiAccess::from_credential("  ApiKey-v1 tok123  ");
        assert_eq!(access.dialect, Dialect::Legacy);
        assert_eq!(access.auth_header, "ApiKey-v1 tok123");
    }

    #[test]
    fn test_with_roots_override() {
        let access = ApiAccess::with_roots("sometoken", "http://legacy.test", "http://modern.test");
        assert_eq!(access.base_root, "http://modern.test");

        let access = ApiAccess::with_roots("ApiKey-v1 tok", "http://legacy.test", "http://modern.test");
        assert_eq!(access.base_root, "http://legacy.test");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let a = ApiAccess::from_credential("ApiKey-v1 tok123");
        let b = ApiAccess::from_credential("ApiKey-v1 tok123");
        assert_eq!(a.auth_header, b.auth_header);
        assert_eq!(a.base_root, b.base_root);
    }
}
