use anyhow::Context;
use reqwest::{Client, Method, Request, Response};
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Authenticator, HttpAuthenticator, LmSecurityCtrl};
use crate::error::ApiError;

/// HTTP client for the LM API.
/// Every request is decorated with a freshly obtained access token.
pub struct LmHttpClient<A = HttpAuthenticator> {
    /// Shared HTTP client with connection pooling
    client: Client,

    /// Security controller handing out tokens
    security: Arc<LmSecurityCtrl<A>>,

    /// Base URL of the LM environment
    base_url: String,
}

impl<A: Authenticator> LmHttpClient<A> {
    /// Create a new HTTP client
    pub fn new(
        security: Arc<LmSecurityCtrl<A>>,
        base_url: impl Into<String>,
        connect_timeout: u64,
        request_timeout: u64,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout))
            .timeout(Duration::from_secs(request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            security,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Authenticated GET against an API path
    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let request = self.client.request(Method::GET, self.url(path)).build()?;
        self.execute(request).await
    }

    /// Execute a request with the current access token attached.
    /// If no token can be obtained the request is never sent.
    pub async fn execute(&self, mut request: Request) -> Result<Response, ApiError> {
        let headers = std::mem::take(request.headers_mut());
        *request.headers_mut() = self.security.add_access_headers(Some(headers)).await?;

        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(method = %method, url = %url, "Sending HTTP request");

        let response = self.client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            tracing::debug!(status = %status, "Request successful");
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        tracing::error!(
            status = status.as_u16(),
            url = %url,
            response_body = %error_text,
            "HTTP request failed with error response"
        );
        Err(ApiError::LmApiError {
            status: status.as_u16(),
            message: error_text,
        })
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialSet;

    fn security() -> Arc<LmSecurityCtrl> {
        let creds = CredentialSet::builder("https://lm.example.com")
            .client_id("svc")
            .client_secret("secret")
            .build()
            .unwrap();
        Arc::new(LmSecurityCtrl::new(&creds).unwrap())
    }

    #[test]
    fn test_url_joining() {
        let client = LmHttpClient::new(security(), "https://lm.example.com/", 30, 60).unwrap();

        assert_eq!(
            client.url("/api/topology/deployments"),
            "https://lm.example.com/api/topology/deployments"
        );
        assert_eq!(
            client.url("api/resource-manager"),
            "https://lm.example.com/api/resource-manager"
        );
    }
}
