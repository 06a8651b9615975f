use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    Completed,
    Missed,
    #[default]
    Pending,
}

impl HabitStatus {
    /// Parses a status name case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "completed" => Some(Self::Completed),
            "missed" => Some(Self::Missed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Missed => "missed",
            Self::Pending => "pending",
        }
    }

    /// Name written to the store's select field ("Completed", "Missed", "Pending").
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Missed => "Missed",
            Self::Pending => "Pending",
        }
    }
}

impl fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub category: String,
    pub frequency: String,
    pub streak: u32,
    pub completion_rate: f64,
    pub status: HabitStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewHabit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

/// Whether a repository result came back from the store or was produced locally
/// because the store could not be reached.
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    Remote(T),
    Fallback(T),
}

impl<T> Sourced<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn source(&self) -> DataSource {
        match self {
            Self::Remote(_) => DataSource::Remote,
            Self::Fallback(_) => DataSource::Fallback,
        }
    }

    pub fn as_inner(&self) -> &T {
        match self {
            Self::Remote(value) | Self::Fallback(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Remote(value) | Self::Fallback(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Remote,
    Fallback,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitsResponse {
    pub source: DataSource,
    pub habits: Vec<Habit>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitResponse {
    pub source: DataSource,
    pub habit: Habit,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub active_habits: usize,
    pub completion_rate: u32,
    pub longest_streak: u32,
    pub categories: usize,
}

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct StatusBreakdown {
    pub completed: usize,
    pub missed: usize,
    pub pending: usize,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub name: String,
    pub habits: usize,
    pub completion_rate: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub habits: Vec<Habit>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub date: String,
    pub source: DataSource,
    pub overview: Overview,
    pub status_breakdown: StatusBreakdown,
    pub category_performance: Vec<CategoryPerformance>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub source: DataSource,
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    pub api_token: String,
    pub collection_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub collection_id: Option<String>,
    pub token_configured: bool,
    pub api_base_url: String,
    pub api_version: String,
}
