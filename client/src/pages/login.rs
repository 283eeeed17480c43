//! Admin credential login.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use serde_json::Map;

use crate::components::form_field::FormField;
use crate::entity::field::{FieldDescriptor, FieldTag};
use crate::entity::validate::{Rule, validate};
use crate::state::auth::AuthState;
use crate::state::form::FormState;
use crate::state::toast::ToastState;
use crate::util::paths::DASHBOARD_PATH;

fn login_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("email", "Email", FieldTag::Email)
            .placeholder("admin@example.com")
            .required()
            .rule(Rule::Email),
        FieldDescriptor::new("password", "Password", FieldTag::Password)
            .required()
            .rule(Rule::MinLength(6)),
    ]
}

/// Trimmed email and raw password from the form.
fn credentials(form: &FormState) -> (String, String) {
    (form.text("email").trim().to_owned(), form.text("password"))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let form = RwSignal::new(FormState::new(Map::new()));
    let fields = StoredValue::new(login_fields());

    // Already signed in: skip the form.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if auth.with(|a| !a.loading && a.user.is_some()) {
            navigate_home(DASHBOARD_PATH, NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let errors = form.with_untracked(|f| fields.with_value(|fs| validate(f, fs)));
        if !errors.is_empty() {
            form.update(|f| f.set_errors(errors));
            return;
        }
        if !form.try_update(FormState::begin_submit).unwrap_or(false) {
            return;
        }
        let (email, password) = form.with_untracked(credentials);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&email, &password).await {
                    Ok(user) => {
                        auth.set(AuthState { user: Some(user), loading: false });
                        toasts.update(|t| {
                            t.success("Signed in.");
                        });
                        navigate(DASHBOARD_PATH, NavigateOptions::default());
                    }
                    Err(err) => {
                        leptos::logging::warn!("login failed: {}", err.detail());
                        let message = if err.is_unauthenticated() {
                            "Invalid email or password.".to_owned()
                        } else {
                            err.toast_description()
                        };
                        toasts.update(|t| {
                            t.error("Login failed", message);
                        });
                    }
                }
                form.update(FormState::finish_submit);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (email, password, toasts, &navigate);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Fitness Admin"</h1>
                <p class="login-card__subtitle">"Sign in to manage content"</p>
                <form class="login-form" on:submit=on_submit>
                    {fields
                        .get_value()
                        .into_iter()
                        .map(|field| view! { <FormField field=field form=form/> })
                        .collect_view()}
                    <button class="login-button" type="submit" disabled=move || form.with(|f| f.submitting)>
                        {move || if form.with(|f| f.submitting) { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <a class="login-card__back" href="/">"Back to site"</a>
            </div>
        </div>
    }
}
