// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the credential service and the profile lookup.
//!
//! - `POST {base}/auth/login` with `{user_id, password?}` answers
//!   `{access_token}`; refusals carry `{detail}`.
//! - `GET {base}/users/{id}` answers `{name}`; 404 means not found.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::port::{CredentialService, ProfileLookup, SessionError};
use crate::config::SessionConfig;
use crate::domain::session::{AccessToken, Subject, UserProfile};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    name: Option<String>,
}

/// reqwest-backed session client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpSessionClient {
    client: Client,
    base_url: String,
}

impl HttpSessionClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SessionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SessionError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the `[session]` settings.
    ///
    /// # Errors
    ///
    /// See [`HttpSessionClient::new`].
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    /// Returns the service base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn transport(err: &reqwest::Error) -> SessionError {
    SessionError::Transport(err.to_string())
}

/// Turns a non-success response into [`SessionError::Rejected`].
///
/// The body's `detail` is used when present, else the status reason phrase.
async fn rejection(response: Response) -> SessionError {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        });
    SessionError::Rejected {
        detail: detail.unwrap_or_else(|| reason_phrase(status)),
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), str::to_string)
}

impl CredentialService for HttpSessionClient {
    async fn login(
        &self,
        user_id: String,
        password: Option<String>,
    ) -> Result<AccessToken, SessionError> {
        let body = LoginRequest {
            user_id: &user_id,
            password: password.as_deref(),
        };
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(|err| transport(&err))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let parsed: LoginResponse = response
            .json()
            .await
            .map_err(|err| SessionError::InvalidResponse(err.to_string()))?;
        AccessToken::new(parsed.access_token)
            .ok_or_else(|| SessionError::InvalidResponse("empty access token".to_string()))
    }
}

impl ProfileLookup for HttpSessionClient {
    async fn get_user(&self, subject: Subject) -> Result<Option<UserProfile>, SessionError> {
        let response = self
            .client
            .get(self.url(&format!("/users/{subject}")))
            .send()
            .await
            .map_err(|err| transport(&err))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let parsed: UserResponse = response
            .json()
            .await
            .map_err(|err| SessionError::InvalidResponse(err.to_string()))?;
        Ok(parsed.name.and_then(UserProfile::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HttpSessionClient::new("http://localhost:8000/", Duration::from_secs(1))
            .expect("client builds");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/auth/login"), "http://localhost:8000/auth/login");
    }

    #[test]
    fn absent_password_is_omitted_from_body() {
        let body = LoginRequest {
            user_id: "alice",
            password: None,
        };
        let json = serde_json::to_string(&body).expect("serializes");
        assert_eq!(json, r#"{"user_id":"alice"}"#);
    }

    #[test]
    fn reason_phrase_falls_back_to_code() {
        assert_eq!(reason_phrase(StatusCode::UNAUTHORIZED), "Unauthorized");
        let odd = StatusCode::from_u16(599).expect("valid code");
        assert_eq!(reason_phrase(odd), "599");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Port 9 (discard) on localhost is essentially never listening.
        let client = HttpSessionClient::new("http://127.0.0.1:9", Duration::from_secs(2))
            .expect("client builds");
        let result = client.login("alice".to_string(), None).await;
        assert!(matches!(result, Err(SessionError::Transport(_))));
    }
}
