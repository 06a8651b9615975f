//! Wire shape of the remote habit store and its mapping onto [`Habit`].
//!
//! Records carry Notion-style typed properties: `Name` is a title, `Category`,
//! `Frequency` and `Status` are selects, `Streak` and `CompletionRate` are
//! numbers. Every property is optional on ingestion.

use crate::models::{Habit, HabitStatus, NewHabit};
use serde::Deserialize;
use serde_json::{Value, json};

pub const QUERY_PAGE_SIZE: u32 = 100;

const UNNAMED_HABIT: &str = "Unnamed Habit";
const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_FREQUENCY: &str = "Daily";
pub const NEW_HABIT_NAME: &str = "New Habit";
pub const NEW_HABIT_CATEGORY: &str = "Health";

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRecord {
    pub id: String,
    #[serde(default)]
    pub properties: RemoteProperties,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RemoteProperties {
    #[serde(rename = "Name", default)]
    pub name: Option<TitleProperty>,
    #[serde(rename = "Category", default)]
    pub category: Option<SelectProperty>,
    #[serde(rename = "Frequency", default)]
    pub frequency: Option<SelectProperty>,
    #[serde(rename = "Streak", default)]
    pub streak: Option<NumberProperty>,
    #[serde(rename = "CompletionRate", default)]
    pub completion_rate: Option<NumberProperty>,
    #[serde(rename = "Status", default)]
    pub status: Option<SelectProperty>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TitleProperty {
    #[serde(default)]
    pub title: Vec<RichText>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RichText {
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SelectProperty {
    #[serde(default)]
    pub select: Option<SelectOption>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NumberProperty {
    #[serde(default)]
    pub number: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<RemoteRecord>,
}

impl RemoteProperties {
    fn title(&self) -> Option<&str> {
        self.name
            .as_ref()
            .and_then(|prop| prop.title.first())
            .and_then(|rich| rich.text.as_ref())
            .map(|text| text.content.as_str())
            .filter(|content| !content.is_empty())
    }

    /// Current streak, treating anything missing, negative or non-finite as zero.
    pub fn streak(&self) -> u32 {
        number(&self.streak)
            .filter(|value| *value > 0.0)
            .map(|value| value.min(f64::from(u32::MAX)) as u32)
            .unwrap_or(0)
    }

    fn completion_rate(&self) -> f64 {
        number(&self.completion_rate)
            .map(|value| value.clamp(0.0, 100.0))
            .unwrap_or(0.0)
    }
}

fn select_name(prop: &Option<SelectProperty>) -> Option<&str> {
    prop.as_ref()
        .and_then(|prop| prop.select.as_ref())
        .map(|option| option.name.as_str())
        .filter(|name| !name.is_empty())
}

fn number(prop: &Option<NumberProperty>) -> Option<f64> {
    prop.as_ref()
        .and_then(|prop| prop.number)
        .filter(|value| value.is_finite())
}

pub fn to_habit(record: &RemoteRecord) -> Habit {
    let props = &record.properties;
    Habit {
        id: record.id.clone(),
        name: props.title().unwrap_or(UNNAMED_HABIT).to_string(),
        category: select_name(&props.category)
            .unwrap_or(UNCATEGORIZED)
            .to_string(),
        frequency: select_name(&props.frequency)
            .unwrap_or(DEFAULT_FREQUENCY)
            .to_string(),
        streak: props.streak(),
        completion_rate: props.completion_rate(),
        status: select_name(&props.status)
            .and_then(HabitStatus::parse)
            .unwrap_or_default(),
    }
}

/// Create-time fields with empty values replaced by defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitFields {
    pub name: String,
    pub category: String,
    pub frequency: String,
}

impl From<&NewHabit> for HabitFields {
    fn from(new: &NewHabit) -> Self {
        fn pick(value: &Option<String>, default: &str) -> String {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
                .to_string()
        }

        Self {
            name: pick(&new.name, NEW_HABIT_NAME),
            category: pick(&new.category, NEW_HABIT_CATEGORY),
            frequency: pick(&new.frequency, DEFAULT_FREQUENCY),
        }
    }
}

pub fn query_body() -> Value {
    json!({ "page_size": QUERY_PAGE_SIZE })
}

pub fn create_body(collection_id: &str, fields: &HabitFields) -> Value {
    json!({
        "parent": { "database_id": collection_id },
        "properties": {
            "Name": { "title": [{ "text": { "content": fields.name } }] },
            "Category": { "select": { "name": fields.category } },
            "Frequency": { "select": { "name": fields.frequency } },
            "Streak": { "number": 0 },
            "CompletionRate": { "number": 0 },
            "Status": { "select": { "name": HabitStatus::Pending.display_name() } },
        },
    })
}

pub fn status_update_body(status: HabitStatus, streak: u32) -> Value {
    json!({
        "properties": {
            "Status": { "select": { "name": status.display_name() } },
            "Streak": { "number": streak },
        },
    })
}
