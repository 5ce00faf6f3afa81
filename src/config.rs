use std::time::Duration;

use zeroize::Zeroizing;

use crate::errors::{InfoswebError, Result};
use crate::models::Credentials;

/// Host from the reference API collection.
pub const DEFAULT_BASE_URL: &str = "http://129.80.151.82:8081";
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

pub const ENV_BASE_URL: &str = "INFOSWEB_BASE_URL";
pub const ENV_CLIENT_ID: &str = "INFOSWEB_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "INFOSWEB_CLIENT_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "INFOSWEB_ACCESS_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "INFOSWEB_TIMEOUT_SECS";

#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<Zeroizing<String>>,
    /// Pre-acquired bearer token. When set, token acquisition is skipped.
    pub access_token: Option<Zeroizing<String>>,
    pub timeout: Duration,
}

/// Values given on the command line. `None` falls through to the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
    pub timeout_secs: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: None,
            client_secret: None,
            access_token: None,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(Zeroizing::new(client_secret.into()));
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(Zeroizing::new(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve configuration from `lookup` (an environment), then apply
    /// command-line overrides on top.
    pub fn resolve<F>(lookup: F, overrides: ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        // Empty flags fall through to the environment, like unset ones.
        let flag = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let base_url = flag(overrides.base_url)
            .or_else(|| env(ENV_BASE_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match env(ENV_TIMEOUT_SECS) {
                Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                    InfoswebError::config(format!(
                        "{} must be a positive number of seconds, got '{}'",
                        ENV_TIMEOUT_SECS, raw
                    ))
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                InfoswebError::config(format!(
                    "timeout must be a positive number of seconds, got {}",
                    timeout_secs
                ))
            })?;

        Ok(Config {
            base_url,
            client_id: flag(overrides.client_id).or_else(|| env(ENV_CLIENT_ID)),
            client_secret: flag(overrides.client_secret)
                .or_else(|| env(ENV_CLIENT_SECRET))
                .map(Zeroizing::new),
            access_token: flag(overrides.access_token)
                .or_else(|| env(ENV_ACCESS_TOKEN))
                .map(Zeroizing::new),
            timeout,
        })
    }

    /// Client id and secret, or a configuration error naming what is missing.
    pub fn credentials(&self) -> Result<Credentials> {
        let client_id = self.client_id.as_deref().filter(|s| !s.is_empty());
        let client_secret = self
            .client_secret
            .as_ref()
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty());

        match (client_id, client_secret) {
            (Some(id), Some(secret)) => Ok(Credentials::new(id, secret)),
            _ => Err(InfoswebError::config(format!(
                "client ID/secret must be provided via --client-id/--client-secret \
                 or the {}/{} environment variables",
                ENV_CLIENT_ID, ENV_CLIENT_SECRET
            ))),
        }
    }

    /// Absolute URL for an endpoint path, keeping any prefix in `base_url`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Merge a `.env` file into the process environment, if one exists.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn validate_base_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| InfoswebError::config(format!("invalid base URL '{}': {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(InfoswebError::config(format!(
            "invalid base URL '{}': unsupported scheme '{}'",
            raw, other
        ))),
    }
}

/// Load configuration from the process environment, with command-line
/// overrides taking precedence.
///
/// Callers wanting `.env` support load it first with [`load_dotenv`].
pub fn load(overrides: ConfigOverrides) -> Result<Config> {
    let cfg = Config::resolve(|key| std::env::var(key).ok(), overrides)?;
    tracing::debug!(config = ?cfg, "resolved configuration");
    Ok(cfg)
}
