//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Outbound collaborators (the REST backend and the image host) are trait
//! objects so route tests can script them without network access.

use std::sync::Arc;

use crate::services::assets::AssetHost;
use crate::services::backend::Backend;
use crate::services::session::SessionStore;

/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub sessions: SessionStore,
    /// `None` when no asset host is configured; upload routes answer 503.
    pub assets: Option<Arc<dyn AssetHost>>,
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, assets: Option<Arc<dyn AssetHost>>, cookie_secure: bool) -> Self {
        Self { backend, sessions: SessionStore::new(), assets, cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use gateway::{ApiRequest, GatewayError};
    use serde_json::{Value, json};

    use super::*;
    use crate::services::assets::{AssetError, UploadFile};
    use crate::services::session::{AdminProfile, Session};

    /// Backend that answers from a script and records every call.
    #[derive(Default)]
    pub struct MockBackend {
        responses: Mutex<Vec<Result<Value, GatewayError>>>,
        pub calls: Mutex<Vec<(ApiRequest, Option<String>)>>,
    }

    impl MockBackend {
        #[must_use]
        pub fn new(responses: Vec<Result<Value, GatewayError>>) -> Arc<Self> {
            Arc::new(Self { responses: Mutex::new(responses), calls: Mutex::new(Vec::new()) })
        }

        pub fn calls(&self) -> Vec<(ApiRequest, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Backend for MockBackend {
        async fn send(&self, request: &ApiRequest, token: Option<&str>) -> Result<Value, GatewayError> {
            self.calls.lock().unwrap().push((request.clone(), token.map(str::to_owned)));
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Ok(json!({ "status": 200, "data": {} }))
            } else {
                responses.remove(0)
            }
        }
    }

    /// Asset host that hands out predictable URLs.
    #[derive(Default)]
    pub struct MockAssets {
        pub uploaded: Mutex<Vec<(String, String)>>,
        pub destroyed: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl AssetHost for MockAssets {
        async fn upload(&self, file: UploadFile, folder: &str) -> Result<String, AssetError> {
            let mut uploaded = self.uploaded.lock().unwrap();
            uploaded.push((file.file_name.clone(), folder.to_owned()));
            Ok(format!(
                "https://res.cloudinary.com/demo/image/upload/v1/{folder}/{}",
                file.file_name
            ))
        }

        async fn destroy(&self, public_id: &str) -> Result<(), AssetError> {
            self.destroyed.lock().unwrap().push(public_id.to_owned());
            Ok(())
        }

        fn default_folder(&self) -> &str {
            "uploads"
        }
    }

    #[must_use]
    pub fn test_profile() -> AdminProfile {
        AdminProfile {
            id: "admin-1".into(),
            name: "Ada Admin".into(),
            email: "ada@example.com".into(),
            role: "admin".into(),
            image: None,
        }
    }

    /// State over `backend` without an asset host.
    #[must_use]
    pub fn test_app_state(backend: Arc<MockBackend>) -> AppState {
        AppState::new(backend, None, false)
    }

    /// Register a non-expiring session and return its cookie id.
    pub async fn signed_in(state: &AppState) -> String {
        state
            .sessions
            .create(Session::new("access-token".into(), "refresh-token".into(), test_profile()))
            .await
    }
}
