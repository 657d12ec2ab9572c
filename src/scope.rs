//! Standard OpenID Connect scope vocabulary.
//!
//! Two different comparison rules live in this crate, on purpose:
//!
//! - Reconciliation matches a service's *declared* scope strings against the
//!   standard vocabulary leniently, via [`StandardScope::parse`] (trim +
//!   uppercase).
//! - The per-request required-scope check compares the *granted* scope set
//!   against the literal [`OPENID_SCOPE`] value with no normalisation at all.
//!
//! Do not unify the two: a grant carrying `"OpenID"` is treated as missing
//! the required scope, while a service declaring `"  OpenID "` still parses
//! as the standard keyword.

use std::fmt;

/// The literal scope value that marks a request as an OpenID Connect
/// request. Compared case-sensitively against granted scopes.
pub const OPENID_SCOPE: &str = "openid";

/// The fixed vocabulary of standard OpenID Connect scope keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardScope {
    /// Required marker scope for OIDC requests. Releases nothing by itself.
    OpenId,
    /// Releases the profile claim set (name, locale, birthdate, ...).
    Profile,
    /// Releases `email` and `email_verified`.
    Email,
    /// Releases the `address` claim.
    Address,
    /// Releases `phone_number` and `phone_number_verified`.
    Phone,
    /// Does not release claims; marks the service for refresh-token issuance.
    OfflineAccess,
}

impl StandardScope {
    /// Match a declared scope string against the standard vocabulary.
    ///
    /// The raw value is trimmed and uppercased before comparison, so
    /// `"  Email "` parses as [`StandardScope::Email`]. Returns `None` for
    /// anything outside the vocabulary — callers treat that as a
    /// user-defined scope.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "OPENID" => Some(Self::OpenId),
            "PROFILE" => Some(Self::Profile),
            "EMAIL" => Some(Self::Email),
            "ADDRESS" => Some(Self::Address),
            "PHONE" => Some(Self::Phone),
            "OFFLINE_ACCESS" => Some(Self::OfflineAccess),
            _ => None,
        }
    }

    /// Canonical lowercase scope name as it appears on the wire.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenId => OPENID_SCOPE,
            Self::Profile => "profile",
            Self::Email => "email",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::OfflineAccess => "offline_access",
        }
    }

    /// All standard scope keywords, in vocabulary order.
    #[must_use]
    pub fn all() -> [Self; 6] {
        [
            Self::OpenId,
            Self::Profile,
            Self::Email,
            Self::Address,
            Self::Phone,
            Self::OfflineAccess,
        ]
    }
}

impl fmt::Display for StandardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_canonical_names() {
        assert_eq!(StandardScope::parse("openid"), Some(StandardScope::OpenId));
        assert_eq!(StandardScope::parse("profile"), Some(StandardScope::Profile));
        assert_eq!(StandardScope::parse("email"), Some(StandardScope::Email));
        assert_eq!(StandardScope::parse("address"), Some(StandardScope::Address));
        assert_eq!(StandardScope::parse("phone"), Some(StandardScope::Phone));
        assert_eq!(
            StandardScope::parse("offline_access"),
            Some(StandardScope::OfflineAccess)
        );
    }

    #[test]
    fn parse_trims_and_uppercases() {
        assert_eq!(StandardScope::parse("  Email "), Some(StandardScope::Email));
        assert_eq!(
            StandardScope::parse("OFFLINE_ACCESS"),
            Some(StandardScope::OfflineAccess)
        );
        assert_eq!(StandardScope::parse("PrOfIlE"), Some(StandardScope::Profile));
    }

    #[test]
    fn parse_rejects_unknown_scopes() {
        assert_eq!(StandardScope::parse("eduperson"), None);
        assert_eq!(StandardScope::parse(""), None);
        assert_eq!(StandardScope::parse("open id"), None);
    }

    #[test]
    fn name_round_trips_through_parse() {
        for scope in StandardScope::all() {
            assert_eq!(StandardScope::parse(scope.name()), Some(scope));
        }
    }

    #[test]
    fn openid_literal_is_lowercase() {
        // The required-scope check depends on this exact value.
        assert_eq!(OPENID_SCOPE, "openid");
        assert_eq!(StandardScope::OpenId.name(), OPENID_SCOPE);
    }
}
