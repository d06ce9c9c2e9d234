use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Password;

use crate::auth::CredentialSet;

/// LM access token client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Base URL of the LM environment, used for login and API requests
    #[arg(short = 'a', long, env = "LM_ADDRESS")]
    pub address: String,

    /// Address for OAuth token requests (defaults to --address)
    #[arg(long, env = "LM_OAUTH_ADDRESS")]
    pub oauth_address: Option<String>,

    /// Username to authenticate as
    #[arg(short = 'u', long, env = "LM_USERNAME")]
    pub username: Option<String>,

    /// Password for the username
    #[arg(short = 'p', long, env = "LM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// OAuth client id
    #[arg(long, env = "LM_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, env = "LM_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// HTTP connect timeout in seconds
    #[arg(long, env = "HTTP_CONNECT_TIMEOUT", default_value = "30")]
    pub connect_timeout: u64,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_REQUEST_TIMEOUT", default_value = "60")]
    pub http_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a valid access token
    Token,

    /// Log in against the legacy login API and print the result
    Login,

    /// Send an authenticated GET request and print the response body
    Get {
        /// API path, e.g. /api/topology/deployments
        path: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    // LM environment
    pub lm_address: String,
    pub oauth_address: Option<String>,

    // Credentials
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,

    // HTTP client
    pub http_connect_timeout: u64,
    pub http_request_timeout: u64,

    pub log_level: String,
    pub command: Command,
}

impl Config {
    /// Load configuration with priority: CLI > ENV (.env included) > defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(args: CliArgs) -> Result<Self> {
        let lm_address = args.address.trim().to_string();
        if lm_address.is_empty() {
            anyhow::bail!("LM_ADDRESS is required (use -a or set LM_ADDRESS env var)");
        }

        Ok(Config {
            lm_address,
            oauth_address: non_empty(args.oauth_address),
            username: non_empty(args.username),
            password: args.password,
            client_id: non_empty(args.client_id),
            client_secret: args.client_secret,
            http_connect_timeout: args.connect_timeout,
            http_request_timeout: args.http_timeout,
            log_level: args.log_level,
            command: args.command,
        })
    }

    /// A username was given but no password to go with it
    pub fn needs_password_prompt(&self) -> bool {
        self.username.is_some() && self.password.is_none()
    }

    /// Build the credential set, rejecting incomplete combinations
    pub fn credential_set(&self) -> Result<CredentialSet> {
        let mut builder = CredentialSet::builder(self.lm_address.clone());

        if let Some(ref username) = self.username {
            builder = builder.username(username.clone());
        }
        if let Some(ref password) = self.password {
            builder = builder.password(password.clone());
        }
        if let Some(ref client_id) = self.client_id {
            builder = builder.client_id(client_id.clone());
        }
        if let Some(ref client_secret) = self.client_secret {
            builder = builder.client_secret(client_secret.clone());
        }
        if let Some(ref oauth_address) = self.oauth_address {
            builder = builder.oauth_address(oauth_address.clone());
        }

        builder.build().context("Invalid LM credentials")
    }
}

/// Prompt for the password of a configured username
pub fn prompt_password(username: &str) -> Result<String> {
    let password: String = Password::new()
        .with_prompt(format!("Password for {}", username))
        .interact()
        .context("Failed to read password")?;

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    Ok(password)
}

/// Treat blank values from the environment as unset
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
