//! Asset-host URL helpers.
//!
//! Uploaded images are stored by their public delivery URL; deleting one
//! needs the opaque public id embedded in that URL.

#[cfg(test)]
#[path = "asset_test.rs"]
mod asset_test;

use crate::error::GatewayError;

const UPLOAD_MARKER: &str = "/image/upload/v";

/// Extract the public id from `.../image/upload/v<digits>/<id>.<ext>`.
///
/// # Errors
///
/// Returns `GatewayError::Upload` when the URL does not follow that shape.
pub fn public_id_from_url(url: &str) -> Result<String, GatewayError> {
    let invalid = || GatewayError::Upload(format!("invalid asset URL: {url}"));

    let start = url.find(UPLOAD_MARKER).ok_or_else(invalid)? + UPLOAD_MARKER.len();
    let rest = &url[start..];
    let (version, tail) = rest.split_once('/').ok_or_else(invalid)?;
    if version.is_empty() || !version.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let (public_id, ext) = tail.rsplit_once('.').ok_or_else(invalid)?;
    if public_id.is_empty() || ext.is_empty() || !ext.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    Ok(public_id.to_owned())
}

/// Upload response: one URL for a single file, a list for several.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Uploaded {
    One { url: String },
    Many { urls: Vec<String> },
}

impl Uploaded {
    #[must_use]
    pub fn from_urls(mut urls: Vec<String>) -> Self {
        if urls.len() == 1 {
            Self::One { url: urls.remove(0) }
        } else {
            Self::Many { urls }
        }
    }

    #[must_use]
    pub fn into_urls(self) -> Vec<String> {
        match self {
            Self::One { url } => vec![url],
            Self::Many { urls } => urls,
        }
    }
}
