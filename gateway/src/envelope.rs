//! Response envelopes returned by the backend.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GatewayError, UNKNOWN_ERROR_MESSAGE};

/// `{ data: { docs, totalDocs, totalPages } }` returned by list endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize"))]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub data: ListData<T>,
}

/// One server-side page of records plus the totals the table needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize"))]
pub struct ListData<T> {
    #[serde(default)]
    pub docs: Vec<T>,
    #[serde(default)]
    pub total_docs: u64,
    #[serde(default)]
    pub total_pages: u64,
}

impl<T> Default for ListData<T> {
    fn default() -> Self {
        Self { docs: Vec::new(), total_docs: 0, total_pages: 0 }
    }
}

/// `{ status, data, msg }` returned by find/create/update/delete endpoints.
///
/// `status` is a number on some endpoints and a boolean on others.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemEnvelope<T> {
    #[serde(default)]
    pub status: Value,
    pub data: Option<T>,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
}

impl<T> ItemEnvelope<T> {
    /// Whether the backend reported success in its body.
    ///
    /// Any truthy flag counts (`true`, `1`, `"ok"`), except a number or
    /// numeric string that is not positive or reads as an HTTP error code.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match &self.status {
            Value::Bool(ok) => *ok,
            Value::Number(n) => n.as_f64().is_some_and(truthy_code),
            Value::String(s) => {
                let s = s.trim();
                !s.is_empty() && s.parse::<f64>().map_or(true, truthy_code)
            }
            _ => false,
        }
    }
}

fn truthy_code(code: f64) -> bool {
    code > 0.0 && code < 400.0
}

impl<T: serde::de::DeserializeOwned> ListData<T> {
    /// Read a list body that is either paged (`data.docs`) or a bare
    /// `data: [..]` array, as unpaged `all` endpoints return.
    ///
    /// # Errors
    ///
    /// `GatewayError::Decode` when neither shape matches.
    pub fn from_body(mut body: Value) -> Result<Self, GatewayError> {
        let decode = |e: serde_json::Error| GatewayError::Decode(e.to_string());
        if body.get("data").is_some_and(Value::is_array) {
            let raw = body.get_mut("data").map(Value::take).unwrap_or_default();
            let docs: Vec<T> = serde_json::from_value(raw).map_err(decode)?;
            let total_docs = docs.len() as u64;
            return Ok(Self { docs, total_docs, total_pages: u64::from(total_docs > 0) });
        }
        serde_json::from_value::<ListEnvelope<T>>(body).map(|env| env.data).map_err(decode)
    }
}

/// Reject a 2xx body whose envelope `status` reports failure.
///
/// Bodies without a `status` field pass.
///
/// # Errors
///
/// `GatewayError::Status` carrying the body's `msg`/`message`.
pub fn ensure_success(body: &Value) -> Result<(), GatewayError> {
    if body.get("status").is_none() {
        return Ok(());
    }
    let envelope: ItemEnvelope<Value> =
        serde_json::from_value(body.clone()).map_err(|e| GatewayError::Decode(e.to_string()))?;
    if envelope.is_success() {
        return Ok(());
    }
    let status = envelope
        .status
        .as_u64()
        .and_then(|code| u16::try_from(code).ok())
        .filter(|code| *code >= 400)
        .unwrap_or(422);
    Err(GatewayError::Status {
        status,
        message: envelope.msg.unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned()),
    })
}
