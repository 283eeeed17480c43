//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast_stack::ToastStack;
use crate::entity::FormMode;
use crate::pages::{
    dashboard::DashboardPage, entity_edit::EntityEditPage, entity_list::EntityListPage, landing::LandingPage,
    login::LoginPage,
};
use crate::state::{auth::AuthState, toast::ToastState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and toast contexts, looks up the current admin once, and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::pending());
    let toasts = RwSignal::new(ToastState::default());
    provide_context(auth);
    provide_context(toasts);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await;
        auth.set(AuthState { user, loading: false });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/fitness-admin.css"/>
        <Title text="Fitness Admin"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("login")) view=LoginPage/>
                <Route path=StaticSegment("admin") view=DashboardPage/>
                <Route path=(StaticSegment("admin"), ParamSegment("entity")) view=EntityListPage/>
                <Route
                    path=(StaticSegment("admin"), ParamSegment("entity"), StaticSegment("create"))
                    view=|| view! { <EntityEditPage mode=FormMode::Create/> }
                />
                <Route
                    path=(StaticSegment("admin"), ParamSegment("entity"), StaticSegment("update"), ParamSegment("id"))
                    view=|| view! { <EntityEditPage mode=FormMode::Update/> }
                />
                <Route
                    path=(StaticSegment("admin"), ParamSegment("entity"), StaticSegment("resend"), ParamSegment("id"))
                    view=|| view! { <EntityEditPage mode=FormMode::Resend/> }
                />
            </Routes>
        </Router>
        <ToastStack/>
    }
}
