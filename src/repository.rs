//! Data access for habits kept in the remote store.
//!
//! Every operation absorbs remote failures: reads fall back to the demo
//! dataset and writes to a locally synthesized record. Results are tagged
//! with [`Sourced`] so callers can still tell the two apart.

use crate::config::StoreConfig;
use crate::errors::RemoteUnavailable;
use crate::fallback::{demo_habits, local_habit, local_status_update};
use crate::mapping::{
    HabitFields, QueryResponse, RemoteRecord, create_body, query_body, status_update_body,
    to_habit,
};
use crate::models::{Habit, HabitStatus, NewHabit, Sourced};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

const VERSION_HEADER: &str = "Notion-Version";

pub struct HabitRepository {
    config: StoreConfig,
    client: Client,
}

impl HabitRepository {
    pub fn new(config: StoreConfig) -> Result<Self, RemoteUnavailable> {
        if !config.is_configured() {
            warn!("remote store credentials missing; serving fallback data only");
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub async fn list_habits(&self) -> Sourced<Vec<Habit>> {
        match self.query_habits().await {
            Ok(habits) => {
                info!(count = habits.len(), "fetched habits from remote store");
                Sourced::Remote(habits)
            }
            Err(err) => {
                error!("failed to fetch habits: {err}");
                warn!("using fallback habit dataset");
                Sourced::Fallback(demo_habits())
            }
        }
    }

    pub async fn create_habit(&self, new: &NewHabit) -> Sourced<Habit> {
        let fields = HabitFields::from(new);
        match self.insert_habit(&fields).await {
            Ok(habit) => {
                info!(id = %habit.id, "created habit in remote store");
                Sourced::Remote(habit)
            }
            Err(err) => {
                error!("failed to create habit: {err}");
                let habit = local_habit(fields);
                warn!(id = %habit.id, "habit accepted locally only");
                Sourced::Fallback(habit)
            }
        }
    }

    pub async fn update_habit_status(&self, id: &str, status: HabitStatus) -> Sourced<Habit> {
        match self.write_status(id, status).await {
            Ok(habit) => {
                info!(id, %status, streak = habit.streak, "updated habit status");
                Sourced::Remote(habit)
            }
            Err(err) => {
                error!(id, "failed to update habit status: {err}");
                Sourced::Fallback(local_status_update(id, status))
            }
        }
    }

    async fn query_habits(&self) -> Result<Vec<Habit>, RemoteUnavailable> {
        let collection_id = self.collection_id()?;
        let url = self.endpoint(&["databases", collection_id, "query"])?;
        let response = self
            .authorized(self.client.post(url))?
            .json(&query_body())
            .send()
            .await?;

        let body: QueryResponse = read_json(response).await?;
        Ok(body.results.iter().map(to_habit).collect())
    }

    async fn insert_habit(&self, fields: &HabitFields) -> Result<Habit, RemoteUnavailable> {
        let collection_id = self.collection_id()?;
        let url = self.endpoint(&["pages"])?;
        let response = self
            .authorized(self.client.post(url))?
            .json(&create_body(collection_id, fields))
            .send()
            .await?;

        let record: RemoteRecord = read_json(response).await?;
        Ok(to_habit(&record))
    }

    async fn write_status(&self, id: &str, status: HabitStatus) -> Result<Habit, RemoteUnavailable> {
        let url = self.endpoint(&["pages", id])?;

        let response = self.authorized(self.client.get(url.clone()))?.send().await?;
        let current: RemoteRecord = read_json(response).await?;
        let streak = next_streak(status, current.properties.streak());

        let response = self
            .authorized(self.client.patch(url))?
            .json(&status_update_body(status, streak))
            .send()
            .await?;

        let updated: RemoteRecord = read_json(response).await?;
        Ok(to_habit(&updated))
    }

    fn collection_id(&self) -> Result<&str, RemoteUnavailable> {
        self.config
            .collection_id
            .as_deref()
            .ok_or(RemoteUnavailable::NotConfigured)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, RemoteUnavailable> {
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or(RemoteUnavailable::NotConfigured)?;
        Ok(request
            .bearer_auth(token)
            .header(VERSION_HEADER, &self.config.api_version))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteUnavailable> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|err| RemoteUnavailable::InvalidUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| RemoteUnavailable::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Streak after moving to `status`. Any status other than completed resets it,
/// including pending.
pub fn next_streak(status: HabitStatus, current: u32) -> u32 {
    match status {
        HabitStatus::Completed => current.saturating_add(1),
        HabitStatus::Missed | HabitStatus::Pending => 0,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteUnavailable> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteUnavailable::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|err| RemoteUnavailable::Decode(err.to_string()))
}
