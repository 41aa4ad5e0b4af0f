//! Fluent builders for test objects

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::{json, Map, Value};

/// Builds unsigned three-part credentials for tests.
///
/// The signature segment is a placeholder; the decoder only reads the
/// payload, which is all the display-only credential path ever looks at.
#[derive(Debug, Default)]
pub struct CredentialBuilder {
    claims: Map<String, Value>,
}

impl CredentialBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.claims.insert("name".to_string(), json!(name));
        self
    }

    #[must_use]
    pub fn given_name(mut self, given_name: &str) -> Self {
        self.claims.insert("given_name".to_string(), json!(given_name));
        self
    }

    #[must_use]
    pub fn family_name(mut self, family_name: &str) -> Self {
        self.claims
            .insert("family_name".to_string(), json!(family_name));
        self
    }

    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.claims.insert("email".to_string(), json!(email));
        self
    }

    #[must_use]
    pub fn picture(mut self, picture: &str) -> Self {
        self.claims.insert("picture".to_string(), json!(picture));
        self
    }

    /// Add an arbitrary claim
    #[must_use]
    pub fn claim(mut self, key: &str, value: Value) -> Self {
        self.claims.insert(key.to_string(), value);
        self
    }

    /// Assemble the `header.payload.signature` token
    ///
    /// # Panics
    /// Panics if claim serialization fails, which cannot happen for the JSON
    /// values this builder accepts.
    #[must_use]
    pub fn build(self) -> String {
        let header = json!({ "alg": "none", "typ": "JWT" });
        let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string().as_bytes());
        let payload = Value::Object(self.claims);
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header_b64}.{payload_b64}.unsigned")
    }
}
