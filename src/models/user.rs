use serde::Serialize;
use serde_json::Value;

/// Raw JSON returned by the user endpoints, passed through verbatim.
pub type ResponseBody = Value;

/// Account state to request from Infosweb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn endpoint_path(self) -> &'static str {
        match self {
            UserStatus::Active => crate::client::ACTIVATE_PATH,
            UserStatus::Inactive => crate::client::DEACTIVATE_PATH,
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            UserStatus::Active => "activate",
            UserStatus::Inactive => "deactivate",
        }
    }
}

/// JSON body accepted by both `activar` and `desactivar`.
#[derive(Debug, Serialize)]
pub struct UserStatusRequest<'a> {
    pub nombre_usuario: &'a str,
}

/// Envelope fields Infosweb usually includes in its responses.
///
/// Only read for logging; success is decided by the HTTP status alone.
#[derive(Debug, Default, PartialEq)]
pub struct ResponseEnvelope {
    pub estado: Option<String>,
    pub detalle: Option<String>,
}

impl ResponseEnvelope {
    pub fn inspect(body: &ResponseBody) -> Self {
        Self {
            estado: body.get("estado").map(scalar_to_string),
            detalle: body.get("detalle").map(scalar_to_string),
        }
    }
}

fn scalar_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
