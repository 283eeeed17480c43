//! Authenticated admin chrome: sidebar, header, and the route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every `/admin/*` page except login renders inside this shell. Children
//! mount only once the current-user lookup has answered with a user, so page-level
//! fetches never race an anonymous session.

use gateway::EntityKind;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;
use crate::util::paths::{DASHBOARD_PATH, is_section_active, list_href};

#[component]
pub fn AdminShell(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let location = use_location();

    install_unauth_redirect(auth, navigate);

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            auth.update(AuthState::sign_out);
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(crate::util::auth::LOGIN_PATH);
            }
        });
    };

    let user_name = move || auth.with(|a| a.user.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let dashboard_active = move || location.pathname.with(|p| p.trim_end_matches('/') == DASHBOARD_PATH);

    view! {
        <Show
            when=move || auth.with(|a| !a.loading && a.user.is_some())
            fallback=move || {
                view! {
                    <div class="admin-loading">
                        <p>{move || if auth.with(|a| a.loading) { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="admin-layout">
                <nav class="admin-sidebar">
                    <a class="admin-sidebar__brand" href=DASHBOARD_PATH>"Fitness Admin"</a>
                    <a class="admin-sidebar__link" class:admin-sidebar__link--active=dashboard_active href=DASHBOARD_PATH>
                        "Dashboard"
                    </a>
                    {EntityKind::ALL
                        .iter()
                        .map(|&kind| {
                            let active = move || location.pathname.with(|p| is_section_active(p, kind));
                            view! {
                                <a class="admin-sidebar__link" class:admin-sidebar__link--active=active href=list_href(kind)>
                                    {kind.label()}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
                <div class="admin-main">
                    <header class="admin-header toolbar">
                        <span class="toolbar__spacer"></span>
                        <span class="toolbar__self">{user_name}</span>
                        <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                            "Logout"
                        </button>
                    </header>
                    <main class="admin-content">{children()}</main>
                </div>
            </div>
        </Show>
    }
}
