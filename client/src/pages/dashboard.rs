//! Admin dashboard: one card per administered entity.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use gateway::EntityKind;
use leptos::prelude::*;

use crate::components::admin_shell::AdminShell;
use crate::util::paths::{create_href, list_href};

#[derive(Clone, Debug, PartialEq, Eq)]
struct EntityCard {
    title: &'static str,
    list: String,
    create: String,
}

fn entity_cards() -> Vec<EntityCard> {
    EntityKind::ALL
        .into_iter()
        .map(|kind| EntityCard {
            title: kind.label(),
            list: list_href(kind),
            create: create_href(kind),
        })
        .collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <AdminShell>
            <div class="dashboard-page">
                <h1 class="dashboard-page__title">"Dashboard"</h1>
                <div class="dashboard-page__cards">
                    {entity_cards()
                        .into_iter()
                        .map(|card| {
                            view! {
                                <article class="entity-card">
                                    <h2 class="entity-card__title">{card.title}</h2>
                                    <div class="entity-card__actions">
                                        <a class="btn btn--small" href=card.list>"Manage"</a>
                                        <a class="btn btn--small btn--primary" href=card.create>"Add New"</a>
                                    </div>
                                </article>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </AdminShell>
    }
}
