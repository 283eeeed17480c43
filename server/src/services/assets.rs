//! Image host client: unsigned uploads and destroy-by-public-id.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser never talks to the image host. Files are posted to
//! `/api/admin/uploads`, forwarded here one by one, and the delivery URLs are
//! returned. Deletes name the stored URL; the public id is parsed out of it by
//! `gateway::asset::public_id_from_url`.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::time::Duration;

use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::session::bytes_to_hex;
use crate::config::AssetConfig;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const UPLOAD_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset host request failed: {0}")]
    Transport(String),
    #[error("asset host rejected the request: {0}")]
    Rejected(String),
}

/// One file received from the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait::async_trait]
pub trait AssetHost: Send + Sync {
    /// Store `file` under `folder` and return its public delivery URL.
    ///
    /// # Errors
    ///
    /// `Transport` without a response, `Rejected` for a non-2xx answer.
    async fn upload(&self, file: UploadFile, folder: &str) -> Result<String, AssetError>;

    /// Remove the asset with `public_id`. Already-missing assets succeed.
    ///
    /// # Errors
    ///
    /// `Transport` without a response, `Rejected` for a non-2xx answer.
    async fn destroy(&self, public_id: &str) -> Result<(), AssetError>;

    /// Folder used when an upload names none.
    fn default_folder(&self) -> &str;
}

pub struct CloudinaryHost {
    client: reqwest::Client,
    config: AssetConfig,
}

impl CloudinaryHost {
    /// # Errors
    ///
    /// Returns the reqwest builder error when the TLS backend cannot start.
    pub fn new(config: AssetConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.config.cloud_name)
    }
}

/// SHA-256 request signature over the sorted, `&`-joined parameters.
#[must_use]
pub fn sign(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by_key(|(k, _)| *k);
    let joined: Vec<String> = sorted.iter().map(|(k, v)| format!("{k}={v}")).collect();
    let digest = Sha256::digest(format!("{}{secret}", joined.join("&")).as_bytes());
    bytes_to_hex(&digest)
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Destroy outcomes that leave the asset gone.
fn destroy_succeeded(result: &str) -> bool {
    matches!(result, "ok" | "not found")
}

async fn read_success(resp: reqwest::Response) -> Result<String, AssetError> {
    let status = resp.status();
    let text = resp.text().await.map_err(|e| AssetError::Transport(e.to_string()))?;
    if !status.is_success() {
        return Err(AssetError::Rejected(format!("{status}: {}", gateway::error::message_from_body(&text))));
    }
    Ok(text)
}

#[async_trait::async_trait]
impl AssetHost for CloudinaryHost {
    fn default_folder(&self) -> &str {
        &self.config.default_folder
    }

    async fn upload(&self, file: UploadFile, folder: &str) -> Result<String, AssetError> {
        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(mime) = file.content_type {
            part = part.mime_str(&mime).map_err(|e| AssetError::Rejected(e.to_string()))?;
        }
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone())
            .text("folder", folder.to_owned());

        let resp = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AssetError::Transport(e.to_string()))?;
        let text = read_success(resp).await?;
        let parsed: UploadResponse =
            serde_json::from_str(&text).map_err(|e| AssetError::Rejected(format!("unexpected response: {e}")))?;
        Ok(parsed.secure_url)
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AssetError> {
        let timestamp = time::OffsetDateTime::now_utc().unix_timestamp().to_string();
        let mut fields: Vec<(&str, String)> = vec![("public_id", public_id.to_owned())];
        if let Some(key) = &self.config.api_key {
            fields.push(("api_key", key.clone()));
        }
        match &self.config.api_secret {
            Some(secret) => {
                let signature = sign(&[("public_id", public_id), ("timestamp", &timestamp)], secret);
                fields.push(("timestamp", timestamp));
                fields.push(("signature", signature));
                fields.push(("signature_algorithm", "sha256".to_owned()));
            }
            None => fields.push(("upload_preset", self.config.upload_preset.clone())),
        }

        let resp = self
            .client
            .post(self.endpoint("destroy"))
            .form(&fields)
            .send()
            .await
            .map_err(|e| AssetError::Transport(e.to_string()))?;
        let text = read_success(resp).await?;
        let parsed: DestroyResponse =
            serde_json::from_str(&text).map_err(|e| AssetError::Rejected(format!("unexpected response: {e}")))?;
        if destroy_succeeded(&parsed.result) {
            Ok(())
        } else {
            Err(AssetError::Rejected(parsed.result))
        }
    }
}
