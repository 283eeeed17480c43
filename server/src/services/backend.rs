//! HTTP executor for `gateway::ApiRequest`.
//!
//! DESIGN
//! ======
//! Routes and auth services depend on the `Backend` trait, never on reqwest,
//! so tests inject a scripted backend through `AppState`.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::time::Duration;

use gateway::{ApiRequest, Body, GatewayError, Method};
use serde_json::Value;

use crate::config::BackendConfig;

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Execute `request`, authenticating with `token` when given.
    ///
    /// # Errors
    ///
    /// `GatewayError::Transport` when no response arrives, the classified
    /// status error for non-2xx, and `Decode` for a non-JSON body.
    async fn send(&self, request: &ApiRequest, token: Option<&str>) -> Result<Value, GatewayError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns the reqwest builder error when the TLS backend cannot start.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { client, base_url: config.base_url.clone(), api_key: config.api_key.clone() })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Turn a status and raw body into the JSON value or a classified error.
pub(crate) fn read_body(status: u16, path: &str, text: &str) -> Result<Value, GatewayError> {
    if !(200..300).contains(&status) {
        return Err(GatewayError::from_response(status, path, text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: &ApiRequest, token: Option<&str>) -> Result<Value, GatewayError> {
        let url = request.url(&self.base_url);
        let mut builder = self.client.request(reqwest_method(request.method), &url);
        for (name, value) in request.headers(&self.api_key, token) {
            builder = builder.header(name, value);
        }
        if let Body::Json(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, path = %request.path, "backend request failed");
            GatewayError::Transport(e.to_string())
        })?;
        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| GatewayError::Transport(e.to_string()))?;
        tracing::debug!(method = request.method.as_str(), path = %request.path, status, "backend call");
        read_body(status, &request.path, &text)
    }
}
