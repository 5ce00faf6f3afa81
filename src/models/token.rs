use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroizing;

use crate::errors::{InfoswebError, Result};

/// Client-credentials pair used against the OAuth token endpoint.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
        }
    }

    /// `Authorization` header value for HTTP Basic auth.
    pub fn basic_auth(&self) -> String {
        use base64::Engine;
        let raw = Zeroizing::new(format!("{}:{}", self.client_id, *self.client_secret));
        let encoded = base64::engine::general_purpose::STANDARD.encode(raw.as_bytes());
        format!("Basic {}", encoded)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// `token_type` as sent, with a missing or null value read as `Bearer`.
fn lenient_token_type<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => default_token_type(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Payload returned by the OAuth token endpoint.
///
/// Only `access_token` is required to be a string; the other fields are kept
/// as whatever JSON the issuer sent.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type", deserialize_with = "lenient_token_type")]
    pub token_type: String,
    /// Lifetime hint, as reported by the issuer. See [`TokenResponse::expires_in_secs`].
    #[serde(default)]
    pub expires_in: Option<Value>,
    #[serde(default)]
    pub scope: Option<Value>,
    /// Any other fields the issuer sent back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenResponse {
    /// `expires_in` in seconds, whether the issuer sent a number or a numeric string.
    pub fn expires_in_secs(&self) -> Option<u64> {
        match self.expires_in.as_ref()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Parse a successful token endpoint body.
    ///
    /// A body without a string `access_token` is treated as a rejected token
    /// request, carrying the original status and body.
    pub fn from_body(status: u16, body: Value) -> Result<Self> {
        match body.get("access_token") {
            Some(Value::String(_)) => {}
            _ => return Err(InfoswebError::Authentication { status, body }),
        }
        serde_json::from_value(body.clone())
            .map_err(|_| InfoswebError::Authentication { status, body })
    }
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in_secs())
            .field("scope", &self.scope)
            .finish()
    }
}
