use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InfoswebError>;

#[derive(Debug, Error)]
pub enum InfoswebError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("token request rejected with status {status}: {body}")]
    Authentication { status: u16, body: Value },

    #[error("Infosweb API returned status {status}: {body}")]
    RemoteOperation { status: u16, body: Value },

    #[error("HTTP request to {url} failed: {reason}")]
    Transport {
        url: String,
        reason: String,
        timed_out: bool,
    },
}

impl InfoswebError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Build a transport error from a reqwest failure against `url`.
    pub fn transport(url: &str, err: &reqwest::Error) -> Self {
        let timed_out = err.is_timeout();
        let reason = if timed_out {
            format!("timed out: {}", err)
        } else {
            err.to_string()
        };
        Self::Transport {
            url: url.to_string(),
            reason,
            timed_out,
        }
    }

    /// HTTP status reported by the remote service, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::RemoteOperation { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Process exit code for this error at the command boundary.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Authentication { .. } | Self::RemoteOperation { .. } => 1,
            Self::Transport { .. } => 2,
            Self::Configuration(_) => 3,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
