use super::*;
use crate::request::Body;

#[test]
fn slugs_round_trip_for_every_kind() {
    for kind in EntityKind::ALL {
        assert_eq!(EntityKind::from_slug(kind.slug()), Some(kind));
    }
    assert_eq!(EntityKind::from_slug("nope"), None);
}

#[test]
fn versioned_kinds_use_v1_paths_and_patch() {
    let kind = EntityKind::TrainingLevel;
    let page = PageQuery::default();
    assert_eq!(kind.list_request(&page).path, "/v1/training-level/all");
    assert_eq!(kind.find_request("abc").path, "/v1/training-level/find/abc");
    assert_eq!(kind.create_request(json!({})).path, "/v1/training-level/create");

    let update = kind.update_request("abc", json!({"name": "Pro"})).unwrap();
    assert_eq!(update.method, Method::Patch);
    assert_eq!(update.path, "/v1/training-level/update/abc");

    let delete = kind.delete_request("abc");
    assert_eq!(delete.method, Method::Delete);
    assert_eq!(delete.path, "/v1/training-level/delete/abc");
    assert_eq!(delete.body, Body::Empty);
}

#[test]
fn legacy_kinds_carry_id_in_body() {
    let update = EntityKind::News.update_request("n1", json!({"title": "t"})).unwrap();
    assert_eq!(update.method, Method::Put);
    assert_eq!(update.path, "/news/update");
    assert_eq!(update.body, Body::Json(json!({"title": "t", "id": "n1"})));

    let delete = EntityKind::LiveMatch.delete_request("m9");
    assert_eq!(delete.path, "/admin/live-match/delete");
    assert_eq!(delete.body, Body::Json(json!({"id": "m9"})));

    let list = EntityKind::Highlight.list_request(&PageQuery::default());
    assert_eq!(list.path, "/admin/highlights");
}

#[test]
fn notifications_are_create_only_with_resend() {
    let kind = EntityKind::Notification;
    assert!(kind.update_request("x", json!({})).is_none());
    assert!(kind.supports_resend());
    assert!(!kind.supports_update());
    assert_eq!(kind.create_request(json!({})).path, "/notifications/create");
    assert_eq!(kind.delete_request("x").path, "/notifications/delete/x");
}

#[test]
fn list_request_forwards_page_query() {
    let page = PageQuery { page_index: 2, page_size: 30, search: Some("arm".into()) };
    let req = EntityKind::Category.list_request(&page);
    assert_eq!(
        req.query,
        vec![
            ("page".to_owned(), "3".to_owned()),
            ("limit".to_owned(), "30".to_owned()),
            ("search".to_owned(), "arm".to_owned()),
        ]
    );
}

#[test]
fn reorder_only_for_position_sensitive_kinds() {
    assert!(EntityKind::Category.reorder_request(&["a".into()], 0).is_none());

    let req = EntityKind::LiveMatch
        .reorder_request(&["b".into(), "a".into()], 0)
        .unwrap();
    assert_eq!(req.path, "/admin/live-match/sort");
    assert_eq!(
        req.body,
        Body::Json(json!({"positions": [{"id": "b", "position": 1}, {"id": "a", "position": 2}]}))
    );
}

#[test]
fn reorder_on_later_page_continues_global_positions() {
    let page = PageQuery::from_params(Some("2"), Some("10"), None);
    let req = EntityKind::LiveMatch
        .reorder_request(&["m12".into(), "m11".into()], page.offset())
        .unwrap();
    assert_eq!(
        req.body,
        Body::Json(json!({"positions": [{"id": "m12", "position": 11}, {"id": "m11", "position": 12}]}))
    );
}

#[test]
fn reference_request_is_unpaged() {
    let req = EntityKind::Equipment.reference_request();
    assert_eq!(req.path, "/v1/equipment/all");
    assert!(req.query.is_empty());
}
