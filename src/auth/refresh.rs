// Authentication round trips

use anyhow::Context;
use reqwest::Client;
use std::future::Future;

use super::login::LmSecurityDriver;
use super::types::{AuthMethod, AuthResponse, LoginResponse, OAuthTokenResponse};
use crate::error::{AuthError, Result};

/// Performs one authentication round trip for a bound method
pub trait Authenticator: Send + Sync {
    fn authenticate(
        &self,
        method: &AuthMethod,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;
}

impl<T: Authenticator> Authenticator for std::sync::Arc<T> {
    async fn authenticate(&self, method: &AuthMethod) -> Result<AuthResponse> {
        self.as_ref().authenticate(method).await
    }
}

/// Get OAuth token URL for an address
fn get_oauth_token_url(address: &str) -> String {
    format!("{}/oauth/token", address.trim_end_matches('/'))
}

/// Authenticator talking to a real LM environment
#[derive(Clone)]
pub struct HttpAuthenticator {
    client: Client,
}

impl HttpAuthenticator {
    pub fn new(timeout: std::time::Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn legacy_password(
        &self,
        username: &str,
        password: &str,
        login_address: &str,
    ) -> Result<AuthResponse> {
        tracing::debug!("Authenticating via legacy login at {}", login_address);

        let driver = LmSecurityDriver::new(self.client.clone(), login_address);
        let login_result = driver.login(username, password).await?;

        let data: LoginResponse = serde_json::from_value(login_result)
            .map_err(|e| AuthError::InvalidResponse(format!("login result: {}", e)))?;

        into_auth_response(data.access_token, data.expires_in, "login result")
    }

    async fn oauth_grant(
        &self,
        token_address: &str,
        client_id: &str,
        client_secret: &str,
        form: &[(&str, &str)],
    ) -> Result<AuthResponse> {
        let url = get_oauth_token_url(token_address);

        tracing::debug!(
            "OAuth token request: url={}, grant_type={}, client_id={}",
            url,
            form.first().map(|(_, v)| *v).unwrap_or_default(),
            client_id
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                "OAuth token request failed: status={}, body={}",
                status,
                error_text
            );
            return Err(AuthError::UnexpectedStatus {
                context: "OAuth token request",
                status: status.as_u16(),
                body: error_text,
            });
        }

        let data: OAuthTokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(format!("OAuth token response: {}", e)))?;

        into_auth_response(data.access_token, data.expires_in, "OAuth token response")
    }
}

impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self, method: &AuthMethod) -> Result<AuthResponse> {
        match method {
            AuthMethod::LegacyPassword {
                username,
                password,
                login_address,
            } => self.legacy_password(username, password, login_address).await,
            AuthMethod::Password {
                username,
                password,
                client_id,
                client_secret,
                token_address,
            } => {
                let form = [
                    ("grant_type", "password"),
                    ("username", username.as_str()),
                    ("password", password.as_str()),
                ];
                self.oauth_grant(token_address, client_id, client_secret, &form)
                    .await
            }
            AuthMethod::ClientCredentials {
                client_id,
                client_secret,
                token_address,
            } => {
                let form = [("grant_type", "client_credentials")];
                self.oauth_grant(token_address, client_id, client_secret, &form)
                    .await
            }
        }
    }
}

fn into_auth_response(
    access_token: Option<String>,
    expires_in: Option<u64>,
    source: &str,
) -> Result<AuthResponse> {
    let access_token = access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidResponse(format!("{} has no access token", source)))?;
    let expires_in = expires_in
        .ok_or_else(|| AuthError::InvalidResponse(format!("{} has no expiry", source)))?;

    Ok(AuthResponse {
        access_token,
        expires_in,
    })
}
