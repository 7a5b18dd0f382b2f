use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by an identity token issued by the external identity provider.
///
/// Only `sub` and `exp` are mandatory; the profile claims refresh the local
/// user row. Roles are never read from the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject: the provider's opaque user id.
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued-at time (Unix timestamp).
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl IdentityClaims {
    /// Claims for `sub` valid for `ttl_secs` from now, with no profile data.
    #[must_use]
    pub fn new(sub: impl Into<String>, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: sub.into(),
            exp: now + ttl_secs,
            iat: Some(now),
            iss: None,
            email: None,
            first_name: None,
            last_name: None,
            profile_image_url: None,
        }
    }
}

/// Verify an identity token (HS256) and return its claims.
///
/// When `issuer` is set the token's `iss` must match it.
///
/// # Errors
///
/// Returns an error if the signature, expiry, or issuer check fails, or if the
/// subject is blank.
pub fn validate_identity_token(
    token: &str,
    secret: &str,
    issuer: Option<&str>,
) -> anyhow::Result<IdentityClaims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(iss) = issuer {
        validation.set_issuer(&[iss]);
    }

    let token_data = decode::<IdentityClaims>(token, &key, &validation)
        .map_err(|e| anyhow::anyhow!("Invalid identity token: {e}"))?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(anyhow::anyhow!("Identity token has an empty subject"));
    }

    Ok(token_data.claims)
}

/// Sign identity claims with the shared secret.
///
/// Production tokens come from the identity provider; this is used for local
/// development tokens and by the test suite.
///
/// # Errors
///
/// Returns an error if JWT encoding fails.
pub fn encode_identity_token(claims: &IdentityClaims, secret: &str) -> anyhow::Result<String> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| anyhow::anyhow!("Failed to encode identity token: {e}"))
}
