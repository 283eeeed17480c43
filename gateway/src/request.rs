//! Transport-neutral description of one backend call.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde_json::Value;

use crate::query::PageQuery;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
}

/// One backend request: method, path relative to the backend base URL,
/// query pairs, and body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: Body::Empty }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append `page`, `limit`, and (when set) `search`.
    #[must_use]
    pub fn with_page(mut self, page: &PageQuery) -> Self {
        for (key, value) in page.api_params() {
            self.query.push((key.to_owned(), value));
        }
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Body::Json(body);
        self
    }

    /// Absolute URL against `base`, with the query string percent-encoded.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        let mut url = format!("{}{}", base.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    /// Headers every backend call carries.
    ///
    /// The API key is always present; the bearer token only when a session
    /// supplied one.
    #[must_use]
    pub fn headers(&self, api_key: &str, token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut headers = vec![(API_KEY_HEADER, api_key.to_owned())];
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.push((AUTHORIZATION_HEADER, format!("Bearer {token}")));
        }
        if matches!(self.body, Body::Json(_)) {
            headers.push((CONTENT_TYPE_HEADER, "application/json".to_owned()));
        }
        headers
    }
}
