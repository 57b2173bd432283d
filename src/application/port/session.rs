// SPDX-License-Identifier: MPL-2.0
//! Credential service and profile lookup port definitions.
//!
//! The HTTP adapter in `infrastructure::http` implements both traits.

use std::future::Future;

use thiserror::Error;

use crate::domain::session::{AccessToken, Subject, UserProfile};

/// Failures reported by the credential service or the profile lookup.
///
/// `Clone` so results can travel inside iced messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The service answered and refused the request.
    #[error("{detail}")]
    Rejected {
        /// Human-readable reason supplied by the service.
        detail: String,
    },

    /// The service could not be reached.
    #[error("service unreachable: {0}")]
    Transport(String),

    /// The service answered with something that is not the expected body.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Exchanges credentials for an access token.
pub trait CredentialService {
    /// Logs in as `user_id`. An absent password is sent as absent, not empty.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Rejected`] with the service's detail message
    /// when the credentials are refused.
    fn login(
        &self,
        user_id: String,
        password: Option<String>,
    ) -> impl Future<Output = Result<AccessToken, SessionError>> + Send;
}

/// Looks up display data for a subject.
pub trait ProfileLookup {
    /// Fetches the profile of `subject`. `Ok(None)` means not found.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup itself failed.
    fn get_user(
        &self,
        subject: Subject,
    ) -> impl Future<Output = Result<Option<UserProfile>, SessionError>> + Send;
}
