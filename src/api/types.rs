//! Request/response payload records for the remote API

use serde::{Deserialize, Serialize};

use crate::models::{Identity, Provider};

/// User record as reported by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl RemoteUser {
    /// Convert the backend record into a portal identity
    #[must_use]
    pub fn into_identity(self, provider: Provider) -> Identity {
        Identity {
            display_name: self.name,
            email: self.email.filter(|email| !email.is_empty()),
            picture_url: self.picture.filter(|url| !url.is_empty()),
            provider,
        }
    }
}

/// Response from the auth endpoints that establish a session
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    /// Bearer credential for subsequent authenticated calls
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<RemoteUser>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPasswordPayload<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResetPasswordPayload<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct GoogleLoginPayload<'a> {
    pub credential: &'a str,
}

/// Error body shape reported by the backend on non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_user_into_identity_drops_empty_fields() {
        let user = RemoteUser {
            name: "Sarah Johnson".to_string(),
            email: Some(String::new()),
            picture: None,
        };

        let identity = user.into_identity(Provider::Local);
        assert_eq!(identity.display_name, "Sarah Johnson");
        assert_eq!(identity.email, None);
        assert_eq!(identity.picture_url, None);
    }

    #[test]
    fn test_auth_response_tolerates_missing_fields() {
        let response: AuthResponse = serde_json::from_str("{}").unwrap();
        assert!(response.token.is_none());
        assert!(response.user.is_none());
        assert!(response.message.is_none());
    }

    #[test]
    fn test_auth_response_parses_full_body() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"token":"abc","user":{"name":"Ada","email":"ada@x.com"},"message":"ok"}"#,
        )
        .unwrap();

        assert_eq!(response.token.as_deref(), Some("abc"));
        assert_eq!(response.user.unwrap().name, "Ada");
    }
}
