use super::*;

#[test]
fn titles_name_mode_and_entity() {
    assert_eq!(page_title(EntityKind::Workout, FormMode::Create), "Create Workout");
    assert_eq!(page_title(EntityKind::TrainingLevel, FormMode::Update), "Update Training Level");
    assert_eq!(page_title(EntityKind::Notification, FormMode::Resend), "Resend Notification");
}

#[test]
fn notifications_resend_instead_of_update() {
    assert!(!mode_allowed(EntityKind::Notification, FormMode::Update));
    assert!(mode_allowed(EntityKind::Notification, FormMode::Resend));
    assert!(mode_allowed(EntityKind::Notification, FormMode::Create));
}

#[test]
fn other_entities_update_but_never_resend() {
    for kind in EntityKind::ALL.into_iter().filter(|k| *k != EntityKind::Notification) {
        assert!(mode_allowed(kind, FormMode::Update), "{kind:?}");
        assert!(!mode_allowed(kind, FormMode::Resend), "{kind:?}");
    }
}
