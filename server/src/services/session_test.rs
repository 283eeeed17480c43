use super::*;

fn jwt_with_exp(exp: u64) -> String {
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"admin","exp":{exp}}}"#));
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.signature")
}

fn profile() -> AdminProfile {
    AdminProfile {
        id: "u1".into(),
        name: "Ada".into(),
        email: "ada@example.com".into(),
        role: "admin".into(),
        image: None,
    }
}

// =============================================================================
// bytes_to_hex / generate_token
// =============================================================================

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a, 0xff]), "0aff");
}

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// token_expiry_ms
// =============================================================================

#[test]
fn expiry_read_from_exp_claim() {
    assert_eq!(token_expiry_ms(&jwt_with_exp(1_700_000_000)), Some(1_700_000_000_000));
}

#[test]
fn expiry_tolerates_padded_payload() {
    let token = jwt_with_exp(42);
    let (head, rest) = token.split_once('.').unwrap();
    let (payload, sig) = rest.split_once('.').unwrap();
    let padded = format!("{head}.{payload}==.{sig}");
    assert_eq!(token_expiry_ms(&padded), Some(42_000));
}

#[test]
fn expiry_none_for_opaque_tokens() {
    assert_eq!(token_expiry_ms("opaque-token"), None);
    assert_eq!(token_expiry_ms("a.!!!.c"), None);
    let no_exp = format!("h.{}.s", URL_SAFE_NO_PAD.encode(r#"{"sub":"x"}"#));
    assert_eq!(token_expiry_ms(&no_exp), None);
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn needs_refresh_inside_leeway() {
    let session = Session::new(jwt_with_exp(1_000), "r".into(), profile());
    assert!(!session.needs_refresh(900_000));
    assert!(session.needs_refresh(1_000_000 - EXPIRY_LEEWAY_MS));
    assert!(session.needs_refresh(2_000_000));
}

#[test]
fn opaque_tokens_never_refresh() {
    let session = Session::new("opaque".into(), "r".into(), profile());
    assert!(!session.needs_refresh(u64::MAX));
}

#[test]
fn renew_keeps_refresh_token_when_none_issued() {
    let mut session = Session::new(jwt_with_exp(1), "refresh-1".into(), profile());
    session.renew(jwt_with_exp(5), None);
    assert_eq!(session.refresh_token, "refresh-1");
    assert_eq!(session.expires_at_ms, Some(5_000));

    session.renew(jwt_with_exp(9), Some("refresh-2".into()));
    assert_eq!(session.refresh_token, "refresh-2");
}

// =============================================================================
// SessionStore
// =============================================================================

#[tokio::test]
async fn store_create_get_remove() {
    let store = SessionStore::new();
    let id = store.create(Session::new("a".into(), "r".into(), profile())).await;
    assert_eq!(store.get(&id).await.map(|s| s.access_token), Some("a".to_owned()));
    assert_eq!(store.len().await, 1);

    assert!(store.remove(&id).await.is_some());
    assert!(store.get(&id).await.is_none());
}

#[tokio::test]
async fn replace_ignores_unknown_ids() {
    let store = SessionStore::new();
    store.replace("missing", Session::new("a".into(), "r".into(), profile())).await;
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn remove_if_refresh_token_matches_current_token_only() {
    let store = SessionStore::new();
    let id = store.create(Session::new("a".into(), "r1".into(), profile())).await;

    assert!(!store.remove_if_refresh_token(&id, "r0").await);
    assert_eq!(store.len().await, 1);
    assert!(store.remove_if_refresh_token(&id, "r1").await);
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn refresh_lock_is_shared_per_session() {
    let store = SessionStore::new();
    let id = store.create(Session::new("a".into(), "r".into(), profile())).await;
    let first = store.refresh_lock(&id).await.unwrap();
    let second = store.refresh_lock(&id).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(store.refresh_lock("missing").await.is_none());
}

// =============================================================================
// idle expiry
// =============================================================================

#[tokio::test]
async fn prune_evicts_idle_sessions() {
    let store = SessionStore::with_idle_ttl(60_000);
    store.create(Session::new("a".into(), "r".into(), profile())).await;
    store.create(Session::new("b".into(), "r".into(), profile())).await;

    assert_eq!(store.prune(now_ms()).await, 0);
    assert_eq!(store.prune(now_ms() + 120_000).await, 2);
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn idle_session_is_gone_on_get() {
    let store = SessionStore::with_idle_ttl(0);
    let id = store.create(Session::new("a".into(), "r".into(), profile())).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    assert!(store.get(&id).await.is_none());
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn create_drops_abandoned_sessions() {
    let store = SessionStore::with_idle_ttl(50);
    store.create(Session::new("old".into(), "r".into(), profile())).await;
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let id = store.create(Session::new("new".into(), "r".into(), profile())).await;
    assert_eq!(store.len().await, 1);
    assert_eq!(store.get(&id).await.map(|s| s.access_token), Some("new".to_owned()));
}
