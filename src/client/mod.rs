//! Infosweb user-management API client.
//!
//! Implements the three calls of the Infosweb integration API:
//! - `oauth/token` (client-credentials grant, HTTP Basic auth)
//! - `usuarios/activar`
//! - `usuarios/desactivar`
//!
//! The client is stateless: tokens are never cached, and each user operation
//! without a supplied token requests a fresh one first.

pub mod transport;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::{InfoswebError, Result};
use crate::models::{ResponseBody, ResponseEnvelope, TokenResponse, UserStatus, UserStatusRequest};

pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport};

pub const TOKEN_PATH: &str = "/Banesco/integracion/oauth/token";
pub const ACTIVATE_PATH: &str = "/Banesco/integracion/api/v1/usuarios/activar";
pub const DEACTIVATE_PATH: &str = "/Banesco/integracion/api/v1/usuarios/desactivar";

pub struct InfoswebClient<T: Transport = ReqwestTransport> {
    config: Config,
    transport: T,
}

impl InfoswebClient<ReqwestTransport> {
    /// Create a client backed by reqwest, honouring the configured timeout.
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> InfoswebClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Request a bearer token using the client credentials flow.
    pub async fn request_token(&self) -> Result<TokenResponse> {
        let credentials = self.config.credentials()?;
        let url = self.config.endpoint(TOKEN_PATH);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, sensitive_header(&credentials.basic_auth(), "client credentials")?);

        debug!(url = %url, client_id = %credentials.client_id, "requesting access token");

        let resp = self
            .transport
            .post(HttpRequest {
                url,
                headers,
                body: RequestBody::Form(vec![("grant_type", "client_credentials".to_string())]),
            })
            .await?;

        let status = resp.status.as_u16();
        if !resp.status.is_success() {
            warn!(status, "token request rejected");
            return Err(InfoswebError::Authentication {
                status,
                body: resp.json_or_text(),
            });
        }

        let token = TokenResponse::from_body(status, resp.json_or_text())?;
        info!(
            token_type = %token.token_type,
            expires_in = ?token.expires_in_secs(),
            "access token acquired"
        );
        Ok(token)
    }

    /// Move `username` to `desired_status`, returning the remote body verbatim.
    ///
    /// Uses `access_token` if given, then the configured token, and otherwise
    /// requests a new one.
    pub async fn set_user_status(
        &self,
        username: &str,
        desired_status: UserStatus,
        access_token: Option<&str>,
    ) -> Result<ResponseBody> {
        let supplied = access_token
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.config
                    .access_token
                    .as_ref()
                    .map(|t| t.as_str())
                    .filter(|t| !t.is_empty())
            })
            .map(str::to_string);

        let token = match supplied {
            Some(token) => token,
            None => self.request_token().await?.access_token,
        };

        let url = self.config.endpoint(desired_status.endpoint_path());
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            sensitive_header(&format!("Bearer {}", token), "access token")?,
        );
        let body = serde_json::to_value(UserStatusRequest {
            nombre_usuario: username,
        })
        .map_err(|e| InfoswebError::config(format!("failed to encode request body: {}", e)))?;

        debug!(url = %url, username, action = desired_status.action(), "updating user status");

        let resp = self
            .transport
            .post(HttpRequest {
                url,
                headers,
                body: RequestBody::Json(body),
            })
            .await?;

        let status = resp.status.as_u16();
        let body = resp.json_or_text();
        if !resp.status.is_success() {
            warn!(status, username, action = desired_status.action(), "user status update rejected");
            return Err(InfoswebError::RemoteOperation { status, body });
        }

        let envelope = ResponseEnvelope::inspect(&body);
        info!(
            status,
            username,
            action = desired_status.action(),
            estado = envelope.estado.as_deref().unwrap_or("-"),
            "user status update completed"
        );
        Ok(body)
    }

    /// Activate an Infosweb user by `nombre_usuario`.
    pub async fn activate_user(
        &self,
        username: &str,
        access_token: Option<&str>,
    ) -> Result<ResponseBody> {
        self.set_user_status(username, UserStatus::Active, access_token)
            .await
    }

    /// Deactivate an Infosweb user by `nombre_usuario`.
    pub async fn deactivate_user(
        &self,
        username: &str,
        access_token: Option<&str>,
    ) -> Result<ResponseBody> {
        self.set_user_status(username, UserStatus::Inactive, access_token)
            .await
    }
}

/// Authorization header value; `what` names its source in the error.
fn sensitive_header(value: &str, what: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        InfoswebError::config(format!(
            "{} contains characters not allowed in an HTTP header",
            what
        ))
    })?;
    header.set_sensitive(true);
    Ok(header)
}

// ── Tests ──────────────────────────────────────────────────────
