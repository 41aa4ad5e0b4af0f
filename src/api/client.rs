//! The `reqwest`-based request helper and its service trait seam

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::models::{LoginRequest, RegistrationRequest};

use super::error::ApiError;
use super::types::{
    AuthResponse, ErrorBody, ForgotPasswordPayload, GoogleLoginPayload, RemoteUser,
    ResetPasswordPayload,
};

/// Remote authentication operations exposed by the backend.
///
/// Kept behind a trait so callers can swap in a mock for tests, mirroring
/// the service seams elsewhere in the crate.
#[async_trait]
pub trait RemoteAuthService {
    /// # Errors
    /// Returns an error if the request fails or the server rejects the
    /// credentials.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// # Errors
    /// Returns an error if the request fails or the server rejects the
    /// registration.
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResponse, ApiError>;

    /// Fetch the user the bearer credential belongs to
    ///
    /// # Errors
    /// Returns `Unauthorized` when the credential is missing or expired.
    async fn current_user(&self) -> Result<RemoteUser, ApiError>;

    /// # Errors
    /// Returns an error if the request fails; callers typically log and
    /// clear the local session regardless.
    async fn logout(&self) -> Result<(), ApiError>;

    /// # Errors
    /// Returns an error if the request fails.
    async fn forgot_password(&self, email: &str) -> Result<(), ApiError>;

    /// # Errors
    /// Returns an error if the request fails or the reset token is invalid.
    async fn reset_password(&self, token: &str, password: &str) -> Result<(), ApiError>;

    /// Exchange an external provider credential for a backend session
    ///
    /// # Errors
    /// Returns an error if the request fails or the credential is rejected.
    async fn google_login(&self, credential: &str) -> Result<AuthResponse, ApiError>;
}

/// Thin request helper over the portal backend
pub struct PortalApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl PortalApi {
    /// Create a client for the given base URL (e.g. `https://host/api`)
    ///
    /// # Errors
    /// Returns `Configuration` if the base URL is not a valid absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Url::parse(base_url)
            .map_err(|err| ApiError::Configuration(format!("invalid base URL {base_url}: {err}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer credential for subsequent authenticated calls
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, authenticated: bool) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.http.post(self.endpoint(path)).json(body);
        if authenticated {
            builder = self.authorize(builder);
        }
        Self::execute(builder).await
    }

    async fn execute<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|err| ApiError::Network(format!("failed to parse response: {err}")))
    }

    async fn execute_unit(builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteAuthService for PortalApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/login", request, false).await
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/register", request, false).await
    }

    async fn current_user(&self) -> Result<RemoteUser, ApiError> {
        let builder = self.authorize(self.http.get(self.endpoint("/auth/me")));
        Self::execute(builder).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let builder = self.authorize(self.http.post(self.endpoint("/auth/logout")));
        Self::execute_unit(builder).await
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let builder = self
            .http
            .post(self.endpoint("/auth/forgot-password"))
            .json(&ForgotPasswordPayload { email });
        Self::execute_unit(builder).await
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<(), ApiError> {
        let builder = self
            .http
            .post(self.endpoint("/auth/reset-password"))
            .json(&ResetPasswordPayload { token, password });
        Self::execute_unit(builder).await
    }

    async fn google_login(&self, credential: &str) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/google", &GoogleLoginPayload { credential }, false)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = PortalApi::new("not a url");
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let api = PortalApi::new("http://localhost:8080/api/").unwrap();
        assert_eq!(api.endpoint("/auth/login"), "http://localhost:8080/api/auth/login");
    }

    #[test]
    fn test_token_lifecycle() {
        let mut api = PortalApi::new("http://localhost:8080/api").unwrap();
        assert!(!api.has_token());

        api.set_token("abc");
        assert!(api.has_token());

        api.clear_token();
        assert!(!api.has_token());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        // Discard port; nothing listens there.
        let api = PortalApi::new("http://127.0.0.1:9/api").unwrap();
        let result = api.login(&LoginRequest::new("ada", "secret")).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
