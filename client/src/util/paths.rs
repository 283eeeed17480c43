//! In-app admin routes per entity.

#[cfg(test)]
#[path = "paths_test.rs"]
mod paths_test;

use gateway::EntityKind;

pub const DASHBOARD_PATH: &str = "/admin";

pub fn list_href(kind: EntityKind) -> String {
    format!("/admin/{}", kind.slug())
}

pub fn create_href(kind: EntityKind) -> String {
    format!("/admin/{}/create", kind.slug())
}

pub fn update_href(kind: EntityKind, id: &str) -> String {
    format!("/admin/{}/update/{}", kind.slug(), urlencoding::encode(id))
}

/// Resend form for kinds that support it.
pub fn resend_href(kind: EntityKind, id: &str) -> Option<String> {
    kind.supports_resend()
        .then(|| format!("/admin/{}/resend/{}", kind.slug(), urlencoding::encode(id)))
}

/// Whether `pathname` is within `kind`'s section of the admin.
pub fn is_section_active(pathname: &str, kind: EntityKind) -> bool {
    let base = list_href(kind);
    pathname == base || pathname.strip_prefix(&base).is_some_and(|rest| rest.starts_with('/'))
}
