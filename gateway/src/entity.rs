//! Administered entity kinds and their backend endpoints.
//!
//! DESIGN
//! ======
//! The backend grew three path conventions over time. Each `EntityKind`
//! picks one `Endpoints` style so callers only ever ask for "list",
//! "find", "create", and so on:
//! - `Versioned`: `/v1/<slug>/...`, update by PATCH with the id in the path.
//! - `Notifications`: create-only; "resend" is a create with old content.
//! - `Legacy`: listing under `/admin/...`, update/delete carry the id in the
//!   JSON body.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::query::PageQuery;
use crate::request::{ApiRequest, Method};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Category,
    Equipment,
    TargetMuscle,
    TrainingLevel,
    Workout,
    Subscription,
    Notification,
    LiveMatch,
    News,
    Highlight,
    User,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoints {
    Versioned(&'static str),
    Notifications,
    Legacy { list: &'static str, base: &'static str },
}

impl EntityKind {
    pub const ALL: [Self; 11] = [
        Self::Category,
        Self::Equipment,
        Self::TargetMuscle,
        Self::TrainingLevel,
        Self::Workout,
        Self::Subscription,
        Self::Notification,
        Self::LiveMatch,
        Self::News,
        Self::Highlight,
        Self::User,
    ];

    /// Path segment used in admin URLs (`/admin/<slug>`).
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Equipment => "equipment",
            Self::TargetMuscle => "target-muscle",
            Self::TrainingLevel => "training-level",
            Self::Workout => "workout",
            Self::Subscription => "subscription",
            Self::Notification => "notification",
            Self::LiveMatch => "live-match",
            Self::News => "news",
            Self::Highlight => "highlight",
            Self::User => "users",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Equipment => "Equipment",
            Self::TargetMuscle => "Target Muscle",
            Self::TrainingLevel => "Training Level",
            Self::Workout => "Workout",
            Self::Subscription => "Subscription",
            Self::Notification => "Notification",
            Self::LiveMatch => "Live Match",
            Self::News => "News",
            Self::Highlight => "Highlight",
            Self::User => "User",
        }
    }

    fn endpoints(self) -> Endpoints {
        match self {
            Self::Category => Endpoints::Versioned("/v1/category"),
            Self::Equipment => Endpoints::Versioned("/v1/equipment"),
            Self::TargetMuscle => Endpoints::Versioned("/v1/target-muscle"),
            Self::TrainingLevel => Endpoints::Versioned("/v1/training-level"),
            Self::Workout => Endpoints::Versioned("/v1/workout"),
            Self::Subscription => Endpoints::Versioned("/v1/subscription"),
            Self::User => Endpoints::Versioned("/v1/users"),
            Self::Notification => Endpoints::Notifications,
            Self::LiveMatch => Endpoints::Legacy { list: "/admin/live-matches", base: "/admin/live-match" },
            Self::News => Endpoints::Legacy { list: "/admin/news", base: "/news" },
            Self::Highlight => Endpoints::Legacy { list: "/admin/highlights", base: "/highlights" },
        }
    }

    fn base(self) -> &'static str {
        match self.endpoints() {
            Endpoints::Versioned(base) | Endpoints::Legacy { base, .. } => base,
            Endpoints::Notifications => "/notifications",
        }
    }

    #[must_use]
    pub fn supports_update(self) -> bool {
        !matches!(self.endpoints(), Endpoints::Notifications)
    }

    #[must_use]
    pub fn supports_resend(self) -> bool {
        matches!(self.endpoints(), Endpoints::Notifications)
    }

    /// Rows carry a manual position the admin can drag to change.
    #[must_use]
    pub fn supports_reorder(self) -> bool {
        matches!(self, Self::LiveMatch)
    }

    #[must_use]
    pub fn list_request(self, page: &PageQuery) -> ApiRequest {
        let path = match self.endpoints() {
            Endpoints::Legacy { list, .. } => list.to_owned(),
            _ => format!("{}/all", self.base()),
        };
        ApiRequest::get(path).with_page(page)
    }

    /// Unpaged listing used to populate choice fields from reference data.
    #[must_use]
    pub fn reference_request(self) -> ApiRequest {
        match self.endpoints() {
            Endpoints::Legacy { list, .. } => ApiRequest::get(list),
            _ => ApiRequest::get(format!("{}/all", self.base())),
        }
    }

    #[must_use]
    pub fn find_request(self, id: &str) -> ApiRequest {
        ApiRequest::get(format!("{}/find/{id}", self.base()))
    }

    #[must_use]
    pub fn create_request(self, body: Value) -> ApiRequest {
        ApiRequest::post(format!("{}/create", self.base())).json(body)
    }

    /// `None` for kinds the backend never updates in place.
    #[must_use]
    pub fn update_request(self, id: &str, body: Value) -> Option<ApiRequest> {
        match self.endpoints() {
            Endpoints::Versioned(base) => {
                Some(ApiRequest::new(Method::Patch, format!("{base}/update/{id}")).json(body))
            }
            Endpoints::Legacy { base, .. } => {
                Some(ApiRequest::new(Method::Put, format!("{base}/update")).json(with_id(body, id)))
            }
            Endpoints::Notifications => None,
        }
    }

    #[must_use]
    pub fn delete_request(self, id: &str) -> ApiRequest {
        match self.endpoints() {
            Endpoints::Legacy { base, .. } => {
                ApiRequest::new(Method::Delete, format!("{base}/delete")).json(json!({ "id": id }))
            }
            _ => ApiRequest::new(Method::Delete, format!("{}/delete/{id}", self.base())),
        }
    }

    /// Persist a manual ordering of one page of rows.
    ///
    /// Positions are one-based across the whole list: the first id gets
    /// `offset + 1`, where `offset` counts the rows on earlier pages.
    #[must_use]
    pub fn reorder_request(self, ordered_ids: &[String], offset: usize) -> Option<ApiRequest> {
        if !self.supports_reorder() {
            return None;
        }
        let positions: Vec<Value> = ordered_ids
            .iter()
            .enumerate()
            .map(|(i, id)| json!({ "id": id, "position": offset + i + 1 }))
            .collect();
        Some(ApiRequest::post(format!("{}/sort", self.base())).json(json!({ "positions": positions })))
    }
}

fn with_id(body: Value, id: &str) -> Value {
    match body {
        Value::Object(mut map) => {
            map.insert("id".to_owned(), Value::String(id.to_owned()));
            Value::Object(map)
        }
        _ => json!({ "id": id }),
    }
}
