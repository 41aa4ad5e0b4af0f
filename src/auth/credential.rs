//! External identity credential decoding
//!
//! The provider hands over a three-part dot-separated token whose middle part
//! is base64url-encoded JSON carrying identity claims. The payload is decoded
//! for display purposes only; signature verification is the provider's job
//! and is deliberately not performed here.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

use super::error::AuthError;

/// Raw claims carried in the credential payload
#[derive(Debug, Deserialize)]
struct CredentialClaims {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    family_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Identity data extracted from a well-formed credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub display_name: String,
    pub email: Option<String>,
    pub picture_url: Option<String>,
}

/// Decode an external credential into identity claims.
///
/// Display name resolution follows the provider claim variants: a direct
/// `name` claim, then `given_name` + `family_name`, then the email claim.
///
/// # Errors
/// Returns `AuthError::Decode` if the token does not have exactly three
/// parts, the payload is not valid base64url or JSON, or no usable name or
/// email claim is present. Decoding failure is a rejected transition, never
/// a crash.
pub fn decode_credential(token: &str) -> Result<IdentityClaims, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Decode(format!(
            "expected 3 token segments, got {}",
            parts.len()
        )));
    }

    // Some issuers pad the payload segment; base64url is unpadded.
    let payload = parts[1].trim_end_matches('=');
    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|err| AuthError::Decode(format!("invalid payload encoding: {err}")))?;

    let claims: CredentialClaims = serde_json::from_slice(&decoded)
        .map_err(|err| AuthError::Decode(format!("invalid payload JSON: {err}")))?;

    let email = claims.email.filter(|email| !email.trim().is_empty());
    let picture_url = claims.picture.filter(|url| !url.trim().is_empty());

    let display_name = resolve_display_name(&claims.name, &claims.given_name, &claims.family_name)
        .or_else(|| email.clone())
        .ok_or_else(|| {
            AuthError::Decode("credential carries no usable name or email claim".to_string())
        })?;

    Ok(IdentityClaims {
        display_name,
        email,
        picture_url,
    })
}

fn resolve_display_name(
    name: &Option<String>,
    given_name: &Option<String>,
    family_name: &Option<String>,
) -> Option<String> {
    if let Some(name) = name {
        if !name.trim().is_empty() {
            return Some(name.trim().to_string());
        }
    }

    let given = given_name.as_deref().unwrap_or("").trim();
    let family = family_name.as_deref().unwrap_or("").trim();
    let full = format!("{given} {family}").trim().to_string();
    if full.is_empty() {
        None
    } else {
        Some(full)
    }
}
