// Legacy password login against LM

use reqwest::{Client, StatusCode};

use super::types::LoginRequest;
use crate::error::{AuthError, Result};

/// Client for the LM security login API
pub struct LmSecurityDriver {
    lm_base: String,
    client: Client,
}

impl LmSecurityDriver {
    pub fn new(client: Client, lm_base: impl Into<String>) -> Self {
        let lm_base = lm_base.into().trim_end_matches('/').to_string();
        Self { lm_base, client }
    }

    /// Log in with username and password, returning the JSON login result.
    /// Older LM environments have no `/ui` prefix, so a 404/405 on the
    /// primary path is retried once against `/api/login`.
    pub async fn login(&self, username: &str, password: &str) -> Result<serde_json::Value> {
        let body = LoginRequest { username, password };

        let url = format!("{}/ui/api/login", self.lm_base);
        let mut response = self.client.post(&url).json(&body).send().await?;

        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED
        ) {
            let old_url = format!("{}/api/login", self.lm_base);
            tracing::info!(
                "Failed to access login at {} with {} response code, may be an older LM environment, trying {}",
                url,
                response.status().as_u16(),
                old_url
            );
            response = self.client.post(&old_url).json(&body).send().await?;
        }

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                "Authentication request failed: status={}, body={}",
                status,
                error_text
            );
            return Err(AuthError::UnexpectedStatus {
                context: "Authentication request",
                status: status.as_u16(),
                body: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(format!("login result is not JSON: {}", e)))
    }
}
