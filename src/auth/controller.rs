use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::clock::{Clock, SystemClock};
use super::credentials::{select_auth_method, CredentialSet};
use super::refresh::{Authenticator, HttpAuthenticator};
use super::tracker::AuthTracker;
use super::types::AuthMethod;
use crate::error::{AuthError, Result};

/// Default timeout for authentication round trips
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 30;

/// Security controller for a target LM environment.
///
/// Hands out a valid access token on demand, re-authenticating only when the
/// tracked token is missing or within the safety margin of expiry. Callers
/// should ask for a token on every request rather than caching it.
///
/// Expiry check, refresh and tracker update run under a single lock, so
/// concurrent callers wait for one in-flight refresh and then share its
/// token instead of each authenticating.
pub struct LmSecurityCtrl<A = HttpAuthenticator> {
    /// Authentication method selected at construction
    method: AuthMethod,

    /// Performs the round trip for `method`
    authenticator: A,

    /// Current token and expiry
    tracker: Mutex<AuthTracker>,
}

impl LmSecurityCtrl<HttpAuthenticator> {
    /// Create a controller that authenticates over HTTP
    pub fn new(credentials: &CredentialSet) -> anyhow::Result<Self> {
        let authenticator =
            HttpAuthenticator::new(Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS))?;
        Ok(Self::with_authenticator(
            credentials,
            authenticator,
            Arc::new(SystemClock),
        ))
    }
}

impl<A: Authenticator> LmSecurityCtrl<A> {
    pub fn with_authenticator(
        credentials: &CredentialSet,
        authenticator: A,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            method: select_auth_method(credentials),
            authenticator,
            tracker: Mutex::new(AuthTracker::new(clock)),
        }
    }

    pub fn auth_method(&self) -> &AuthMethod {
        &self.method
    }

    /// Get a valid access token, authenticating first if necessary.
    /// A failed round trip propagates and leaves the tracker untouched.
    pub async fn get_access_token(&self) -> Result<String> {
        let mut tracker = self.tracker.lock().await;

        if tracker.has_access_expired() {
            tracing::debug!("Requesting new access token via {}", self.method.name());
            let response = self.authenticator.authenticate(&self.method).await?;
            tracker.accept_auth_response(response);
        }

        tracker
            .current_access_token()
            .map(str::to_owned)
            .ok_or(AuthError::NoAccessToken)
    }

    /// Set `Authorization: Bearer <token>` on the given headers (or a new map)
    pub async fn add_access_headers(&self, headers: Option<HeaderMap>) -> Result<HeaderMap> {
        let mut headers = headers.unwrap_or_default();
        let access_token = self.get_access_token().await?;

        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", access_token)).map_err(|_| {
                AuthError::InvalidResponse("access token is not a valid header value".to_string())
            })?;
        value.set_sensitive(true);

        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Token currently held, without checking expiry or authenticating
    pub async fn cached_access_token(&self) -> Option<String> {
        let tracker = self.tracker.lock().await;
        tracker.current_access_token().map(str::to_owned)
    }
}
