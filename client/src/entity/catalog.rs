//! Field and column definitions for every administered entity.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use gateway::EntityKind;
use serde_json::{Value, json};

use super::EntitySchema;
use super::column::{CellFormat, ColumnDescriptor};
use super::field::{FieldDescriptor, FieldTag, ValueKey};
use super::validate::Rule;

const ACTIVE: CellFormat = CellFormat::Status { on: "Active", off: "Inactive" };
const YES_NO: CellFormat = CellFormat::Status { on: "Yes", off: "No" };

const DURATION_TYPES: &[(&str, &str)] = &[
    ("daily", "Daily"),
    ("weekly", "Weekly"),
    ("monthly", "Monthly"),
    ("yearly", "Yearly"),
];
const NOTIFICATION_TYPES: &[(&str, &str)] = &[("in_app", "In-App"), ("push", "Push")];
const VIDEO_TYPES: &[(&str, &str)] = &[("youtube", "YouTube"), ("source", "Source")];
const ROLES: &[(&str, &str)] = &[("user", "User"), ("admin", "Admin")];
const GENDERS: &[(&str, &str)] = &[("male", "Male"), ("female", "Female"), ("other", "Other")];

pub fn schema_for(kind: EntityKind) -> EntitySchema {
    match kind {
        EntityKind::Category | EntityKind::Equipment | EntityKind::TargetMuscle | EntityKind::TrainingLevel => {
            lookup(kind)
        }
        EntityKind::Workout => workout(),
        EntityKind::Subscription => subscription(),
        EntityKind::Notification => notification(),
        EntityKind::LiveMatch => live_match(),
        EntityKind::News => news(),
        EntityKind::Highlight => highlight(),
        EntityKind::User => user(),
    }
}

fn text(name: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, label, FieldTag::Text)
}

fn field(name: &str, label: &str, tag: FieldTag) -> FieldDescriptor {
    FieldDescriptor::new(name, label, tag)
}

/// Options as `(label, value)` pairs from a `(value, label)` table.
fn choices(table: &'static [(&'static str, &'static str)]) -> impl Iterator<Item = (&'static str, &'static str)> {
    table.iter().map(|(value, label)| (*label, *value))
}

fn status_field() -> FieldDescriptor {
    field("status", "Status", FieldTag::SingleSelect).boolean("Active", "Inactive")
}

fn active_default() -> Vec<(&'static str, Value)> {
    vec![("status", json!(true))]
}

/// Category, equipment, target muscle, and training level share one shape.
fn lookup(kind: EntityKind) -> EntitySchema {
    EntitySchema {
        kind,
        fields: vec![
            text("name", "Name").required(),
            field("description", "Description", FieldTag::TextArea).required(),
            field("image", "Image", FieldTag::Image),
            status_field(),
        ],
        columns: vec![
            ColumnDescriptor::new("image", "Image", CellFormat::Image),
            ColumnDescriptor::text("name", "Name"),
            ColumnDescriptor::new("description", "Description", CellFormat::Truncate(60)),
            ColumnDescriptor::new("status", "Status", ACTIVE),
        ],
        search_placeholder: "Search by name...",
        defaults: active_default(),
    }
}

fn workout() -> EntitySchema {
    EntitySchema {
        kind: EntityKind::Workout,
        fields: vec![
            text("title", "Title").required(),
            field("category", "Category", FieldTag::Select)
                .reference(EntityKind::Category, ValueKey::Id)
                .required(),
            field("level", "Level", FieldTag::Select)
                .reference(EntityKind::TrainingLevel, ValueKey::Name)
                .required(),
            field("duration", "Duration (minutes)", FieldTag::Number)
                .required()
                .rule(Rule::Positive),
            field("caloriesBurnedEstimate", "Calories Burned Estimate", FieldTag::Number).rule(Rule::Positive),
            field("equipment", "Equipment", FieldTag::MultiSelect).reference(EntityKind::Equipment, ValueKey::Name),
            field("targetMuscles", "Target Muscles", FieldTag::Checkbox)
                .reference(EntityKind::TargetMuscle, ValueKey::Name),
            text("videoUrl", "Video URL")
                .placeholder("https://...")
                .required()
                .rule(Rule::Url),
            field("thumbnail", "Thumbnail", FieldTag::Image),
            field("description", "Description", FieldTag::TextArea).required(),
            field("isFavorite", "Featured", FieldTag::SingleSelect).boolean("Yes", "No"),
        ],
        columns: vec![
            ColumnDescriptor::new("thumbnail", "Thumbnail", CellFormat::Image),
            ColumnDescriptor::text("title", "Title"),
            ColumnDescriptor::text("level", "Level"),
            ColumnDescriptor::text("duration", "Duration"),
            ColumnDescriptor::text("equipment", "Equipment"),
            ColumnDescriptor::new("isFavorite", "Featured", YES_NO),
        ],
        search_placeholder: "Search by title...",
        defaults: vec![("isFavorite", json!(false))],
    }
}

fn subscription() -> EntitySchema {
    EntitySchema {
        kind: EntityKind::Subscription,
        fields: vec![
            text("name", "Name").required(),
            text("productId", "Product ID").required(),
            field("durationType", "Duration Type", FieldTag::Select)
                .options(choices(DURATION_TYPES))
                .required(),
            field("duration", "Duration", FieldTag::Number).required().rule(Rule::Positive),
            field("price", "Price", FieldTag::Number).required().rule(Rule::Positive),
            field("description", "Description", FieldTag::TextArea),
            status_field(),
        ],
        columns: vec![
            ColumnDescriptor::text("name", "Name"),
            ColumnDescriptor::text("productId", "Product ID"),
            ColumnDescriptor::new("durationType", "Billing", CellFormat::Mapped(DURATION_TYPES)),
            ColumnDescriptor::text("price", "Price"),
            ColumnDescriptor::new("status", "Status", ACTIVE),
        ],
        search_placeholder: "Search by name...",
        defaults: active_default(),
    }
}

fn notification() -> EntitySchema {
    EntitySchema {
        kind: EntityKind::Notification,
        fields: vec![
            text("title", "Title").required(),
            field("body", "Body", FieldTag::TextArea).required(),
            field("notification_type", "Delivery", FieldTag::SingleSelect)
                .options(choices(NOTIFICATION_TYPES))
                .required(),
            field("image", "Image", FieldTag::Image),
            text("action_url", "Action URL").rule(Rule::Url),
        ],
        columns: vec![
            ColumnDescriptor::new("image", "Image", CellFormat::Image),
            ColumnDescriptor::text("title", "Title"),
            ColumnDescriptor::new("body", "Body", CellFormat::Truncate(60)),
            ColumnDescriptor::new("notification_type", "Delivery", CellFormat::Mapped(NOTIFICATION_TYPES)),
            ColumnDescriptor::new("createdAt", "Sent", CellFormat::DateTime),
        ],
        search_placeholder: "Search by title...",
        defaults: vec![("notification_type", json!("push"))],
    }
}

fn live_match() -> EntitySchema {
    EntitySchema {
        kind: EntityKind::LiveMatch,
        fields: vec![
            text("match_title", "Match Title").required(),
            text("league", "League").required(),
            field("match_time", "Match Time", FieldTag::DateTime)
                .required()
                .rule(Rule::DateTime),
            text("team_one_name", "Team One").required(),
            field("team_one_image", "Team One Logo", FieldTag::Image),
            text("team_two_name", "Team Two").required(),
            field("team_two_image", "Team Two Logo", FieldTag::Image),
            text("stream_url", "Stream URL").rule(Rule::Url),
            field("is_hot", "Hot Match", FieldTag::SingleSelect).boolean("Yes", "No"),
            status_field(),
        ],
        columns: vec![
            ColumnDescriptor::text("position", "#"),
            ColumnDescriptor::text("match_title", "Match"),
            ColumnDescriptor::text("league", "League"),
            ColumnDescriptor::new("match_time", "Kick-off", CellFormat::DateTime),
            ColumnDescriptor::new("is_hot", "Hot", YES_NO),
            ColumnDescriptor::new("status", "Status", ACTIVE),
        ],
        search_placeholder: "Search by match...",
        defaults: vec![("status", json!(true)), ("is_hot", json!(false))],
    }
}

fn news() -> EntitySchema {
    EntitySchema {
        kind: EntityKind::News,
        fields: vec![
            text("title", "Title").required(),
            text("category", "Category").required(),
            text("source_name", "Source"),
            text("league_id", "League ID"),
            field("publish_date", "Publish Date", FieldTag::DateTime).rule(Rule::DateTime),
            text("url", "Article URL").rule(Rule::Url),
            field("description", "Body", FieldTag::RichText).required(),
            field("image", "Image", FieldTag::Image),
        ],
        columns: vec![
            ColumnDescriptor::new("image", "Image", CellFormat::Image),
            ColumnDescriptor::text("title", "Title"),
            ColumnDescriptor::text("category", "Category"),
            ColumnDescriptor::text("source_name", "Source"),
            ColumnDescriptor::new("publish_date", "Published", CellFormat::DateTime),
        ],
        search_placeholder: "Search by title...",
        defaults: Vec::new(),
    }
}

fn highlight() -> EntitySchema {
    EntitySchema {
        kind: EntityKind::Highlight,
        fields: vec![
            text("title", "Title").required(),
            text("category", "Category").required(),
            text("league_id", "League ID"),
            field("date", "Date", FieldTag::DateTime).required().rule(Rule::DateTime),
            field("video_type", "Video Type", FieldTag::SingleSelect)
                .options(choices(VIDEO_TYPES))
                .required(),
            text("youtube_url", "Video URL").required().rule(Rule::Url),
            field("highlight_image", "Cover Image", FieldTag::Image),
        ],
        columns: vec![
            ColumnDescriptor::new("highlight_image", "Cover", CellFormat::Image),
            ColumnDescriptor::text("title", "Title"),
            ColumnDescriptor::text("category", "Category"),
            ColumnDescriptor::new("video_type", "Video", CellFormat::Mapped(VIDEO_TYPES)),
            ColumnDescriptor::new("date", "Date", CellFormat::DateTime),
        ],
        search_placeholder: "Search by title...",
        defaults: vec![("video_type", json!("youtube"))],
    }
}

fn user() -> EntitySchema {
    EntitySchema {
        kind: EntityKind::User,
        fields: vec![
            text("name", "Name").required(),
            field("email", "Email", FieldTag::Email).required().rule(Rule::Email),
            text("phone", "Phone"),
            field("password", "Password", FieldTag::Password).rule(Rule::MinLength(6)),
            field("role", "Role", FieldTag::Select).options(choices(ROLES)).required(),
            field("gender", "Gender", FieldTag::Select).options(choices(GENDERS)),
            field("weight", "Weight (kg)", FieldTag::Number).rule(Rule::Positive),
            field("goalWeight", "Goal Weight (kg)", FieldTag::Number).rule(Rule::Positive),
            field("trainingLevel", "Training Level", FieldTag::Select)
                .reference(EntityKind::TrainingLevel, ValueKey::Name),
            text("provider", "Sign-in Provider").read_only(),
            field("image", "Avatar", FieldTag::Image),
            field("status", "Status", FieldTag::SingleSelect).options([("Active", "active"), ("Blocked", "blocked")]),
        ],
        columns: vec![
            ColumnDescriptor::new("image", "Avatar", CellFormat::Image),
            ColumnDescriptor::text("name", "Name"),
            ColumnDescriptor::text("email", "Email"),
            ColumnDescriptor::new("role", "Role", CellFormat::Mapped(ROLES)),
            ColumnDescriptor::text("trainingLevel", "Level"),
            ColumnDescriptor::new("status", "Status", ACTIVE),
        ],
        search_placeholder: "Search by name or email...",
        defaults: vec![("role", json!("user")), ("status", json!("active"))],
    }
}
