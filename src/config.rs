//! Server configuration

use anyhow::Context;

use crate::email::SmtpConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Shared secret for signing session tokens
    pub secret_key: String,

    /// SMTP configuration; without it OTP mail goes to the console
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Read configuration from the environment
    ///
    /// - `PORT` (default: 3000)
    /// - `SECRET_KEY` (required)
    /// - `SMTP_*` (optional, see [`SmtpConfig::from_env`])
    pub fn from_env() -> anyhow::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let secret_key = std::env::var("SECRET_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .context("SECRET_KEY must be set")?;

        Ok(Self {
            port,
            secret_key,
            smtp: SmtpConfig::from_env(),
        })
    }
}
