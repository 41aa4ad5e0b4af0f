//! The authenticated principal's display data

use serde::{Deserialize, Serialize};

/// How an identity was established.
///
/// `External` identities arrive pre-validated by a third-party provider and
/// are never checked against the local directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Local,
    External,
}

/// The authenticated principal.
///
/// At most one `Identity` is current at any time; the logged-out state is the
/// absence of an identity (`Option<Identity>`), never a sentinel value.
///
/// The serialized field names match the persisted session blob layout
/// (`displayName`, `email`, `pictureUrl`, `provider`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Non-empty for any logged-in identity
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub provider: Provider,
}

impl Identity {
    /// Create a locally established identity with no email or picture
    #[must_use]
    pub fn local(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            email: None,
            picture_url: None,
            provider: Provider::Local,
        }
    }

    /// Create an identity asserted by an external provider
    #[must_use]
    pub fn external(
        display_name: &str,
        email: Option<&str>,
        picture_url: Option<&str>,
    ) -> Self {
        Self {
            display_name: display_name.to_string(),
            email: email.map(ToString::to_string),
            picture_url: picture_url.map(ToString::to_string),
            provider: Provider::External,
        }
    }

    /// First name, used by greeting surfaces ("Welcome Back, {first}!")
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.display_name.split_whitespace().next().unwrap_or("Guest")
    }

    /// Two-letter uppercase initials for avatar rendering.
    ///
    /// Single-word names use the first and last character of the word;
    /// multi-word names use the first character of the first and last words.
    #[must_use]
    pub fn initials(&self) -> String {
        let parts: Vec<&str> = self.display_name.split_whitespace().collect();
        let (first, last) = match parts.as_slice() {
            [] => return "GU".to_string(),
            [only] => (only.chars().next(), only.chars().next_back()),
            [first, .., last] => (first.chars().next(), last.chars().next()),
        };
        match (first, last) {
            (Some(a), Some(b)) => format!("{a}{b}").to_uppercase(),
            _ => "GU".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_serializes_with_camel_case_layout() {
        let identity = Identity::external(
            "Grace Hopper",
            Some("grace@example.com"),
            Some("https://example.com/grace.png"),
        );

        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["displayName"], "Grace Hopper");
        assert_eq!(json["email"], "grace@example.com");
        assert_eq!(json["pictureUrl"], "https://example.com/grace.png");
        assert_eq!(json["provider"], "external");
    }

    #[test]
    fn test_local_identity_omits_absent_fields() {
        let identity = Identity::local("ada");
        let json = serde_json::to_value(&identity).unwrap();

        assert_eq!(json["displayName"], "ada");
        assert_eq!(json["provider"], "local");
        assert!(json.get("email").is_none());
        assert!(json.get("pictureUrl").is_none());
    }

    #[test]
    fn test_first_name_takes_leading_word() {
        assert_eq!(Identity::local("Ada Lovelace").first_name(), "Ada");
        assert_eq!(Identity::local("ada").first_name(), "ada");
        assert_eq!(Identity::local("   ").first_name(), "Guest");
    }

    #[test]
    fn test_initials_from_multi_word_name() {
        assert_eq!(Identity::local("Ada Lovelace").initials(), "AL");
        assert_eq!(Identity::local("Mike P. President").initials(), "MP");
    }

    #[test]
    fn test_initials_from_single_word_name() {
        assert_eq!(Identity::local("ada").initials(), "AA");
        assert_eq!(Identity::local("").initials(), "GU");
    }
}
