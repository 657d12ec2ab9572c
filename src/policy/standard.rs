//! Standard claim vocabularies for the claim-bearing OIDC scopes.
//!
//! Each standard scope releases exactly the intersection of its vocabulary
//! with the principal's attribute names, in vocabulary order, values
//! untouched.

use crate::principal::{AttributeMap, Principal};

/// Claims released by the `profile` scope (OIDC Core 5.4).
pub const PROFILE_CLAIMS: &[&str] = &[
    "name",
    "family_name",
    "given_name",
    "middle_name",
    "nickname",
    "preferred_username",
    "profile",
    "picture",
    "website",
    "gender",
    "birthdate",
    "zoneinfo",
    "locale",
    "updated_at",
];

/// Claims released by the `email` scope.
pub const EMAIL_CLAIMS: &[&str] = &["email", "email_verified"];

/// Claims released by the `address` scope.
pub const ADDRESS_CLAIMS: &[&str] = &["address"];

/// Claims released by the `phone` scope.
pub const PHONE_CLAIMS: &[&str] = &["phone_number", "phone_number_verified"];

/// Copy the allowed claims that the principal actually carries into a
/// fresh map, preserving the allow-list order.
pub(crate) fn release_allowed<I, S>(allowed: I, principal: &Principal) -> AttributeMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut released = AttributeMap::new();
    for claim in allowed {
        let claim = claim.as_ref();
        if let Some(values) = principal.attributes().get(claim) {
            released.insert(claim.to_string(), values.clone());
        }
    }
    released
}

// ============================================================================
// Tests
// ============================================================================
