use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use lmctl_auth::auth::{HttpAuthenticator, LmSecurityCtrl, LmSecurityDriver, SystemClock};
use lmctl_auth::config::{self, Command, Config};
use lmctl_auth::http_client::LmHttpClient;

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = Config::load()?;

    // Initialize logging with a configured level
    let log_level = config.log_level.to_lowercase();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if config.needs_password_prompt() {
        let username = config.username.clone().unwrap_or_default();
        config.password = Some(config::prompt_password(&username)?);
    }

    let credentials = config.credential_set()?;
    tracing::debug!("Using credentials: {:?}", credentials);

    let authenticator =
        HttpAuthenticator::new(Duration::from_secs(config.http_request_timeout))?;

    match config.command {
        Command::Token => {
            let security = LmSecurityCtrl::with_authenticator(
                &credentials,
                authenticator,
                Arc::new(SystemClock),
            );
            let token = security.get_access_token().await?;
            println!("{}", token);
        }

        Command::Login => {
            let username = config
                .username
                .as_deref()
                .context("login requires a username (use -u or set LM_USERNAME)")?;
            let password = config.password.as_deref().unwrap_or_default();

            let client = reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(config.http_connect_timeout))
                .timeout(Duration::from_secs(config.http_request_timeout))
                .build()
                .context("Failed to create HTTP client")?;
            let driver = LmSecurityDriver::new(client, credentials.login_address());

            let login_result = driver.login(username, password).await?;
            println!("{}", serde_json::to_string_pretty(&login_result)?);
        }

        Command::Get { ref path } => {
            let security = Arc::new(LmSecurityCtrl::with_authenticator(
                &credentials,
                authenticator,
                Arc::new(SystemClock),
            ));
            let client = LmHttpClient::new(
                security,
                config.lm_address.clone(),
                config.http_connect_timeout,
                config.http_request_timeout,
            )?;

            let response = client.get(path).await?;
            println!("{}", response.text().await?);
        }
    }

    Ok(())
}
