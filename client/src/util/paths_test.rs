use super::*;

#[test]
fn entity_hrefs_use_slug() {
    assert_eq!(list_href(EntityKind::LiveMatch), "/admin/live-match");
    assert_eq!(create_href(EntityKind::User), "/admin/users/create");
    assert_eq!(update_href(EntityKind::Workout, "w 1"), "/admin/workout/update/w%201");
}

#[test]
fn resend_only_for_notifications() {
    assert_eq!(
        resend_href(EntityKind::Notification, "n1").as_deref(),
        Some("/admin/notification/resend/n1")
    );
    assert_eq!(resend_href(EntityKind::News, "n1"), None);
}

#[test]
fn section_matching_respects_segment_boundaries() {
    assert!(is_section_active("/admin/news", EntityKind::News));
    assert!(is_section_active("/admin/news/update/1", EntityKind::News));
    assert!(!is_section_active("/admin/newsletter", EntityKind::News));
    assert!(!is_section_active("/admin", EntityKind::News));
}
