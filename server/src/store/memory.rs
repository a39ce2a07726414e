use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SchedulerStore, StoreError, StoreResult};
use crate::models::{Event, EventResponse, NewEvent, NewEventResponse};

/// In-process store with the same key, reference and cascade rules as the
/// Postgres schema. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    events: HashMap<String, Event>,
    // Insertion order doubles as the listing order.
    responses: Vec<EventResponse>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchedulerStore for MemoryStore {
    async fn create_event(&self, new_event: NewEvent) -> StoreResult<Event> {
        let mut tables = self.tables.write().await;

        if tables.events.contains_key(&new_event.id) {
            return Err(StoreError::ConstraintViolation {
                message: "duplicate key value violates unique constraint \"events_pkey\"".into(),
                detail: Some(format!("Key (id)=({}) already exists.", new_event.id)),
            });
        }

        let event = Event::from_new(new_event, Utc::now());
        tables.events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: &str) -> StoreResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(id).cloned())
    }

    async fn create_response(&self, new_response: NewEventResponse) -> StoreResult<EventResponse> {
        let mut tables = self.tables.write().await;

        if !tables.events.contains_key(&new_response.event_id) {
            return Err(StoreError::ConstraintViolation {
                message: "insert or update on table \"responses\" violates foreign key constraint \"responses_event_id_fkey\"".into(),
                detail: Some(format!(
                    "Key (event_id)=({}) is not present in table \"events\".",
                    new_response.event_id
                )),
            });
        }

        let response = EventResponse::from_new(new_response, Uuid::new_v4(), Utc::now());
        tables.responses.push(response.clone());
        Ok(response)
    }

    async fn get_responses_by_event(&self, event_id: &str) -> StoreResult<Vec<EventResponse>> {
        let tables = self.tables.read().await;
        Ok(tables
            .responses
            .iter()
            .filter(|response| response.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn delete_event(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;

        if tables.events.remove(id).is_none() {
            return Ok(false);
        }
        tables.responses.retain(|response| response.event_id != id);
        Ok(true)
    }
}
