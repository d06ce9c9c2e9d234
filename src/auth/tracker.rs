// Tracks the most recent access token and when it stops being usable

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use super::clock::Clock;
use super::types::AuthResponse;

/// Lead time before actual expiry at which a token is already treated as expired
pub const SAFETY_MARGIN_SECS: i64 = 1;

/// Upper bound applied to server-declared lifetimes (ten years)
const MAX_TOKEN_LIFETIME_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Holds the current access token and its expiry.
/// Only [`AuthTracker::accept_auth_response`] mutates it.
pub struct AuthTracker {
    current_access_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl AuthTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            current_access_token: None,
            expires_at: None,
            clock,
        }
    }

    /// True when no token has been obtained yet, or it expires within the safety margin
    pub fn has_access_expired(&self) -> bool {
        match (&self.current_access_token, self.expires_at) {
            (Some(_), Some(exp)) => {
                self.clock.now() >= exp - Duration::seconds(SAFETY_MARGIN_SECS)
            }
            _ => true,
        }
    }

    /// Store a fresh authentication result, replacing whatever was held
    pub fn accept_auth_response(&mut self, response: AuthResponse) {
        let lifetime = response.expires_in.min(MAX_TOKEN_LIFETIME_SECS) as i64;
        let expires_at = self.clock.now() + Duration::seconds(lifetime);

        tracing::info!("Access token obtained, expires: {}", expires_at.to_rfc3339());

        self.current_access_token = Some(response.access_token);
        self.expires_at = Some(expires_at);
    }

    pub fn current_access_token(&self) -> Option<&str> {
        self.current_access_token.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
