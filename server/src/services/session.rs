//! In-memory admin sessions.
//!
//! ARCHITECTURE
//! ============
//! The browser only ever holds an opaque random session id in an `HttpOnly`
//! cookie. Backend access and refresh tokens stay server-side in
//! `SessionStore`, keyed by that id.
//!
//! TRADE-OFFS
//! ==========
//! Sessions do not survive a restart; admins sign in again. This keeps the
//! server free of a database for a handful of concurrent users.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

/// Refresh this long before the access token actually expires.
const EXPIRY_LEEWAY_MS: u64 = 30_000;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> u64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    u64::try_from(nanos / 1_000_000).unwrap_or_default()
}

/// Expiry (ms since epoch) from a JWT's `exp` claim.
///
/// The token is decoded, not verified: the backend that issued it is the
/// only party that checks signatures.
#[must_use]
pub fn token_expiry_ms(jwt: &str) -> Option<u64> {
    #[derive(Deserialize)]
    struct Claims {
        exp: u64,
    }

    let payload = jwt.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    claims.exp.checked_mul(1000)
}

/// Administrator profile as returned to the browser by `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// `None` when the access token carries no readable `exp`.
    pub expires_at_ms: Option<u64>,
    pub profile: AdminProfile,
}

impl Session {
    #[must_use]
    pub fn new(access_token: String, refresh_token: String, profile: AdminProfile) -> Self {
        let expires_at_ms = token_expiry_ms(&access_token);
        Self { access_token, refresh_token, expires_at_ms, profile }
    }

    /// Whether the access token should be refreshed before use at `now`.
    #[must_use]
    pub fn needs_refresh(&self, now: u64) -> bool {
        self.expires_at_ms
            .is_some_and(|exp| now.saturating_add(EXPIRY_LEEWAY_MS) >= exp)
    }

    /// Swap in refreshed tokens; the refresh token is kept when none is issued.
    pub fn renew(&mut self, access_token: String, refresh_token: Option<String>) {
        self.expires_at_ms = token_expiry_ms(&access_token);
        self.access_token = access_token;
        if let Some(refresh) = refresh_token.filter(|t| !t.is_empty()) {
            self.refresh_token = refresh;
        }
    }
}

/// Sessions unused for this long are dropped.
pub const SESSION_IDLE_TTL_MS: u64 = 12 * 60 * 60 * 1000;

struct Entry {
    session: Session,
    last_seen_ms: u64,
    /// Held while this session's tokens are being refreshed.
    refresh_lock: Arc<Mutex<()>>,
}

impl Entry {
    fn is_idle(&self, now: u64, ttl_ms: u64) -> bool {
        now.saturating_sub(self.last_seen_ms) > ttl_ms
    }
}

/// Session id -> session, shared across handlers.
///
/// Every successful `get` marks the session as seen; sessions idle for
/// longer than the TTL are pruned on `create` and by `spawn_sweeper`.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
    idle_ttl_ms: u64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_ttl(SESSION_IDLE_TTL_MS)
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_idle_ttl(idle_ttl_ms: u64) -> Self {
        Self { inner: Arc::default(), idle_ttl_ms }
    }

    /// Store `session` under a fresh id and return the id.
    pub async fn create(&self, session: Session) -> String {
        let id = generate_token();
        let now = now_ms();
        let mut map = self.inner.write().await;
        let ttl = self.idle_ttl_ms;
        map.retain(|_, entry| !entry.is_idle(now, ttl));
        map.insert(id.clone(), Entry { session, last_seen_ms: now, refresh_lock: Arc::default() });
        id
    }

    /// The live session for `id`; an idle one is dropped instead.
    pub async fn get(&self, id: &str) -> Option<Session> {
        let now = now_ms();
        let mut map = self.inner.write().await;
        if map.get(id)?.is_idle(now, self.idle_ttl_ms) {
            map.remove(id);
            return None;
        }
        let entry = map.get_mut(id)?;
        entry.last_seen_ms = now;
        Some(entry.session.clone())
    }

    /// Lock serializing token refreshes of one session.
    pub async fn refresh_lock(&self, id: &str) -> Option<Arc<Mutex<()>>> {
        self.inner.read().await.get(id).map(|entry| Arc::clone(&entry.refresh_lock))
    }

    pub async fn replace(&self, id: &str, session: Session) {
        if let Some(entry) = self.inner.write().await.get_mut(id) {
            entry.session = session;
        }
    }

    pub async fn remove(&self, id: &str) -> Option<Session> {
        self.inner.write().await.remove(id).map(|entry| entry.session)
    }

    /// Remove `id` only while it still holds `refresh_token`.
    ///
    /// A refresh that lost a race against a rotation must not sign out the
    /// session the winner just renewed.
    pub async fn remove_if_refresh_token(&self, id: &str, refresh_token: &str) -> bool {
        let mut map = self.inner.write().await;
        if map.get(id).is_some_and(|entry| entry.session.refresh_token == refresh_token) {
            map.remove(id);
            return true;
        }
        false
    }

    /// Drop sessions idle at `now`; returns how many were removed.
    pub async fn prune(&self, now: u64) -> usize {
        let mut map = self.inner.write().await;
        let before = map.len();
        let ttl = self.idle_ttl_ms;
        map.retain(|_, entry| !entry.is_idle(now, ttl));
        before - map.len()
    }

    /// Prune idle sessions every `period` for the life of the process.
    pub fn spawn_sweeper(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(period);
            loop {
                tick.tick().await;
                let removed = store.prune(now_ms()).await;
                if removed > 0 {
                    tracing::info!(removed, "pruned idle sessions");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
