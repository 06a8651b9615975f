use crate::config::StoreConfig;
use crate::errors::AppError;
use crate::models::{
    CategoriesResponse, DashboardResponse, HabitResponse, HabitStatus, HabitsResponse, NewHabit,
    SettingsRequest, SettingsResponse, StatusRequest,
};
use crate::repository::HabitRepository;
use crate::state::AppState;
use crate::stats::{build_dashboard, category_groups};
use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

pub async fn list_habits(State(state): State<AppState>) -> Json<HabitsResponse> {
    let habits = state.repository().await.list_habits().await;
    Json(HabitsResponse {
        source: habits.source(),
        habits: habits.into_inner(),
    })
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabit>,
) -> Json<HabitResponse> {
    let habit = state.repository().await.create_habit(&payload).await;
    Json(HabitResponse {
        source: habit.source(),
        habit: habit.into_inner(),
    })
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<HabitResponse>, AppError> {
    let status = HabitStatus::parse(&payload.status)
        .ok_or_else(|| AppError::bad_request("status must be 'completed', 'missed' or 'pending'"))?;

    let habit = state
        .repository()
        .await
        .update_habit_status(&id, status)
        .await;
    Ok(Json(HabitResponse {
        source: habit.source(),
        habit: habit.into_inner(),
    }))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let habits = state.repository().await.list_habits().await;
    Json(build_dashboard(habits.source(), habits.as_inner()))
}

pub async fn get_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let habits = state.repository().await.list_habits().await;
    Json(CategoriesResponse {
        source: habits.source(),
        categories: category_groups(habits.as_inner()),
    })
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let repository = state.repository().await;
    Json(to_settings(repository.config()))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let api_token = payload.api_token.trim();
    let collection_id = payload.collection_id.trim();
    if api_token.is_empty() || collection_id.is_empty() {
        return Err(AppError::bad_request("apiToken and collectionId are required"));
    }

    let current = state.repository().await;
    let config = StoreConfig {
        api_token: Some(api_token.to_string()),
        collection_id: Some(collection_id.to_string()),
        ..current.config().clone()
    };
    let repository = HabitRepository::new(config)?;
    let response = to_settings(repository.config());

    state.replace_repository(repository).await;
    info!(collection_id, "remote store settings updated");

    Ok(Json(response))
}

fn to_settings(config: &StoreConfig) -> SettingsResponse {
    SettingsResponse {
        collection_id: config.collection_id.clone(),
        token_configured: config.api_token.is_some(),
        api_base_url: config.base_url.clone(),
        api_version: config.api_version.clone(),
    }
}
