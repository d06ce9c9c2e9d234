// Authentication types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication method bound to a security controller.
/// Each variant carries only the fields its round trip needs.
#[derive(Clone, PartialEq)]
pub enum AuthMethod {
    /// Username/password against the legacy login endpoint
    /// Uses {login_address}/ui/api/login, falling back to {login_address}/api/login
    LegacyPassword {
        username: String,
        password: String,
        login_address: String,
    },

    /// OAuth password grant on behalf of a client
    /// Uses {token_address}/oauth/token
    Password {
        username: String,
        password: String,
        client_id: String,
        client_secret: String,
        token_address: String,
    },

    /// OAuth client credentials grant, no end-user identity
    /// Uses {token_address}/oauth/token
    ClientCredentials {
        client_id: String,
        client_secret: String,
        token_address: String,
    },
}

impl AuthMethod {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            AuthMethod::LegacyPassword { .. } => "legacy_password",
            AuthMethod::Password { .. } => "password",
            AuthMethod::ClientCredentials { .. } => "client_credentials",
        }
    }
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::LegacyPassword {
                username,
                login_address,
                ..
            } => f
                .debug_struct("LegacyPassword")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .field("login_address", login_address)
                .finish(),
            AuthMethod::Password {
                username,
                client_id,
                token_address,
                ..
            } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .field("token_address", token_address)
                .finish(),
            AuthMethod::ClientCredentials {
                client_id,
                token_address,
                ..
            } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .field("token_address", token_address)
                .finish(),
        }
    }
}

/// Normalized result of a successful authentication round trip
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    /// Lifetime in seconds from issuance
    pub expires_in: u64,
}

/// Legacy login request body
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Legacy login response
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
}

/// OAuth token endpoint response
#[derive(Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let method = AuthMethod::Password {
            username: "jack".to_string(),
            password: "hunter2".to_string(),
            client_id: "LmClient".to_string(),
            client_secret: "s3cret".to_string(),
            token_address: "https://lm.example.com".to_string(),
        };
        let rendered = format!("{:?}", method);
        assert!(rendered.contains("jack"));
        assert!(rendered.contains("LmClient"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_login_response_camel_case() {
        let body = r#"{"accessToken":"abc","expiresIn":1199,"tokenType":"Bearer"}"#;
        let parsed: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.access_token.as_deref(), Some("abc"));
        assert_eq!(parsed.expires_in, Some(1199));
    }
}
