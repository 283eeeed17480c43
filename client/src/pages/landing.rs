//! Public landing page with marketing copy and the latest news headlines.
//!
//! The news feed is best-effort: a failed fetch renders the page without the
//! headlines section rather than an error.

#[cfg(test)]
#[path = "landing_test.rs"]
mod landing_test;

use leptos::prelude::*;

use crate::net::types::Record;
use crate::util::auth::LOGIN_PATH;
use crate::util::datetime;

const HEADLINE_LIMIT: usize = 3;

const FEATURES: [(&str, &str); 4] = [
    ("Guided workouts", "Programs for every training level, filtered by equipment and target muscle."),
    ("Live matches", "Follow scheduled matches and replays from inside the app."),
    ("Flexible plans", "Daily to yearly subscriptions with a free trial."),
    ("Stay informed", "News, highlights, and in-app notifications in one feed."),
];

#[derive(Clone, Debug, PartialEq, Eq)]
struct Headline {
    title: String,
    published: String,
    image: Option<String>,
}

/// First `limit` titled news records as headlines.
fn headlines(records: &[Record], limit: usize) -> Vec<Headline> {
    records
        .iter()
        .filter_map(|record| {
            let title = record.text("title");
            if title.trim().is_empty() {
                return None;
            }
            let published = ["publish_date", "createdAt"]
                .iter()
                .map(|key| record.text(key))
                .find(|text| !text.is_empty())
                .map(|text| datetime::display(&text))
                .unwrap_or_default();
            let image = Some(record.text("image")).filter(|url| !url.is_empty());
            Some(Headline { title, published, image })
        })
        .take(limit)
        .collect()
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let news = LocalResource::new(|| async {
        match crate::net::api::fetch_news_feed().await {
            Ok(records) => headlines(&records, HEADLINE_LIMIT),
            Err(err) => {
                leptos::logging::warn!("news feed unavailable: {}", err.detail());
                Vec::new()
            }
        }
    });

    view! {
        <div class="landing-page">
            <header class="landing-hero">
                <h1>"Train smarter, every day"</h1>
                <p class="landing-hero__tagline">
                    "Workouts, live matches, and coaching content in a single fitness app."
                </p>
                <a class="btn landing-hero__admin" href=LOGIN_PATH>"Admin sign in"</a>
            </header>
            <section class="landing-features">
                {FEATURES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <article class="landing-feature">
                                <h2>{*title}</h2>
                                <p>{*body}</p>
                            </article>
                        }
                    })
                    .collect_view()}
            </section>
            <Suspense fallback=|| ()>
                {move || {
                    news.get()
                        .filter(|items| !items.is_empty())
                        .map(|items| {
                            view! {
                                <section class="landing-news">
                                    <h2>"Latest news"</h2>
                                    <ul class="landing-news__list">
                                        {items
                                            .into_iter()
                                            .map(|item| {
                                                view! {
                                                    <li class="landing-news__item">
                                                        {item.image.map(|src| view! { <img class="landing-news__thumb" src=src alt=""/> })}
                                                        <span class="landing-news__title">{item.title}</span>
                                                        <span class="landing-news__date">{item.published}</span>
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                </section>
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
