//! HTTP transport seam.
//!
//! `InfoswebClient` only ever talks to the network through [`Transport`], so
//! tests can swap the reqwest implementation for a recording fake.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::errors::{InfoswebError, Result};

#[derive(Debug, Clone)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded`
    Form(Vec<(&'static str, String)>),
    Json(Value),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    /// Body as JSON, or as a JSON string when it is not valid JSON.
    pub fn json_or_text(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// reqwest-backed transport used outside of tests.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .user_agent(format!("infosweb/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InfoswebError::config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest { url, headers, body } = request;

        let builder = self.client.post(&url).headers(headers);
        let builder = match &body {
            RequestBody::Form(pairs) => builder.form(pairs),
            RequestBody::Json(value) => builder.json(value),
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| InfoswebError::transport(&url, &e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| InfoswebError::transport(&url, &e))?;

        Ok(HttpResponse { status, body })
    }
}
