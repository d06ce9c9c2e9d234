// Credential set construction and auth method selection

use std::fmt;

use super::types::AuthMethod;
use crate::error::{AuthError, Result};

/// How to authenticate with a target LM environment.
/// Only obtainable through [`CredentialSetBuilder::build`], which rejects
/// incomplete combinations.
#[derive(Clone)]
pub struct CredentialSet {
    username: Option<String>,
    password: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    login_address: String,
    oauth_address: Option<String>,
}

impl CredentialSet {
    pub fn builder(login_address: impl Into<String>) -> CredentialSetBuilder {
        CredentialSetBuilder {
            login_address: login_address.into(),
            ..Default::default()
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn login_address(&self) -> &str {
        &self.login_address
    }

    pub fn oauth_address(&self) -> Option<&str> {
        self.oauth_address.as_deref()
    }

    /// Address token requests are sent to
    pub fn token_address(&self) -> &str {
        self.oauth_address.as_deref().unwrap_or(&self.login_address)
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("login_address", &self.login_address)
            .field("oauth_address", &self.oauth_address)
            .finish()
    }
}

#[derive(Default)]
pub struct CredentialSetBuilder {
    username: Option<String>,
    password: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    login_address: String,
    oauth_address: Option<String>,
}

impl CredentialSetBuilder {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn oauth_address(mut self, oauth_address: impl Into<String>) -> Self {
        self.oauth_address = Some(oauth_address.into());
        self
    }

    /// Validate the combination of fields
    pub fn build(self) -> Result<CredentialSet> {
        if self.login_address.trim().is_empty() {
            return Err(AuthError::Config("login address is required".to_string()));
        }
        if self.username.is_some() && self.password.is_none() {
            return Err(AuthError::Config(
                "password is required when username is set".to_string(),
            ));
        }
        if self.client_id.is_some() && self.client_secret.is_none() {
            return Err(AuthError::Config(
                "client_secret is required when client_id is set".to_string(),
            ));
        }
        if self.username.is_none() && self.client_id.is_none() {
            return Err(AuthError::Config(
                "either username or client_id is required".to_string(),
            ));
        }

        Ok(CredentialSet {
            username: self.username,
            password: self.password,
            client_id: self.client_id,
            client_secret: self.client_secret,
            login_address: self.login_address,
            oauth_address: self.oauth_address,
        })
    }
}

/// Select the authentication method for a credential set.
/// First match wins: username + client_id, username alone, client only.
pub fn select_auth_method(creds: &CredentialSet) -> AuthMethod {
    // build() guarantees the paired fields are present
    let method = match (&creds.username, &creds.client_id) {
        (Some(username), Some(client_id)) => AuthMethod::Password {
            username: username.clone(),
            password: creds.password.clone().unwrap_or_default(),
            client_id: client_id.clone(),
            client_secret: creds.client_secret.clone().unwrap_or_default(),
            token_address: creds.token_address().to_string(),
        },
        (Some(username), None) => AuthMethod::LegacyPassword {
            username: username.clone(),
            password: creds.password.clone().unwrap_or_default(),
            login_address: creds.login_address.clone(),
        },
        (None, client_id) => AuthMethod::ClientCredentials {
            client_id: client_id.clone().unwrap_or_default(),
            client_secret: creds.client_secret.clone().unwrap_or_default(),
            token_address: creds.token_address().to_string(),
        },
    };

    tracing::info!("Selected auth type: {}", method.name());
    method
}
