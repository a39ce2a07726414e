//! Persistence for events and their responses.
//!
//! Handlers depend on [`SchedulerStore`] only; the concrete store is built once
//! at startup and shared through the application state.

use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

use crate::models::{Event, EventResponse, EventWithResponses, NewEvent, NewEventResponse};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{connect_pool, run_migrations, PgStore};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected a write: duplicate key, dangling reference, missing column value.
    #[error("{message}")]
    ConstraintViolation {
        message: String,
        detail: Option<String>,
    },

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                let detail = db_err
                    .try_downcast_ref::<PgDatabaseError>()
                    .and_then(|pg| pg.detail())
                    .map(str::to_owned);

                return StoreError::ConstraintViolation {
                    message: db_err.message().to_owned(),
                    detail,
                };
            }
        }
        StoreError::Database(err)
    }
}

#[async_trait]
pub trait SchedulerStore: Send + Sync {
    /// Inserts the event and returns the stored row, `createdAt` included.
    async fn create_event(&self, new_event: NewEvent) -> StoreResult<Event>;

    /// `Ok(None)` when no event has this id.
    async fn get_event(&self, id: &str) -> StoreResult<Option<Event>>;

    /// Inserts a response; the referenced event must exist.
    async fn create_response(&self, new_response: NewEventResponse) -> StoreResult<EventResponse>;

    /// All responses for the event in insertion order; empty when there are none.
    async fn get_responses_by_event(&self, event_id: &str) -> StoreResult<Vec<EventResponse>>;

    /// Deletes the event and, by cascade, its responses. Returns whether a row was removed.
    async fn delete_event(&self, id: &str) -> StoreResult<bool>;

    /// Two sequential reads, not a join: a response written between them may or may not appear.
    async fn get_event_with_responses(&self, id: &str) -> StoreResult<Option<EventWithResponses>> {
        let Some(event) = self.get_event(id).await? else {
            return Ok(None);
        };
        let responses = self.get_responses_by_event(id).await?;
        Ok(Some(EventWithResponses { event, responses }))
    }
}
