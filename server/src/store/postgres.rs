use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;

use super::{SchedulerStore, StoreResult};
use crate::config::Config;
use crate::models::{
    Event, EventResponse, EventResponseRow, EventRow, NewEvent, NewEventResponse,
};

/// Opens the connection pool. The caller owns it and closes it on shutdown.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchedulerStore for PgStore {
    async fn create_event(&self, new_event: NewEvent) -> StoreResult<Event> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO practice_scheduler.events (id, title, dates, time_slots)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, dates, time_slots, created_at
            "#,
        )
        .bind(&new_event.id)
        .bind(&new_event.title)
        .bind(Json(&new_event.dates))
        .bind(Json(&new_event.time_slots))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_event(&self, id: &str) -> StoreResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, dates, time_slots, created_at
            FROM practice_scheduler.events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Event::from))
    }

    async fn create_response(&self, new_response: NewEventResponse) -> StoreResult<EventResponse> {
        let row = sqlx::query_as::<_, EventResponseRow>(
            r#"
            INSERT INTO practice_scheduler.responses (event_id, participant_name, selected_slots)
            VALUES ($1, $2, $3)
            RETURNING id, event_id, participant_name, selected_slots, created_at
            "#,
        )
        .bind(&new_response.event_id)
        .bind(&new_response.participant_name)
        .bind(Json(&new_response.selected_slots))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_responses_by_event(&self, event_id: &str) -> StoreResult<Vec<EventResponse>> {
        let rows = sqlx::query_as::<_, EventResponseRow>(
            r#"
            SELECT id, event_id, participant_name, selected_slots, created_at
            FROM practice_scheduler.responses
            WHERE event_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EventResponse::from).collect())
    }

    async fn delete_event(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM practice_scheduler.events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// These need a live Postgres: `DATABASE_URL=... cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    fn practice(id: &str) -> NewEvent {
        NewEvent {
            id: id.into(),
            title: "Practice".into(),
            dates: vec!["2024-01-01".into(), "2024-01-02".into()],
            time_slots: vec!["9am".into(), "10am".into()],
        }
    }

    fn answer(event_id: &str, name: &str) -> NewEventResponse {
        NewEventResponse {
            event_id: event_id.into(),
            participant_name: name.into(),
            selected_slots: vec!["9am".into()],
        }
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_then_get_event(pool: PgPool) {
        let store = PgStore::new(pool);

        let created = store.create_event(practice("abc")).await.unwrap();
        let fetched = store.get_event("abc").await.unwrap().unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.dates, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(fetched.time_slots, vec!["9am", "10am"]);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_duplicate_event_id_is_constraint_violation(pool: PgPool) {
        let store = PgStore::new(pool);
        let original = store.create_event(practice("abc")).await.unwrap();

        let mut again = practice("abc");
        again.title = "Renamed".into();
        let err = store.create_event(again).await.unwrap_err();

        match err {
            StoreError::ConstraintViolation { detail, .. } => {
                assert!(detail.unwrap_or_default().contains("already exists"));
            }
            other => panic!("expected constraint violation, got {other:?}"),
        }
        assert_eq!(store.get_event("abc").await.unwrap(), Some(original));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_missing_event_is_none(pool: PgPool) {
        let store = PgStore::new(pool);
        assert!(store.get_event("nope").await.unwrap().is_none());
        assert!(store.get_event_with_responses("nope").await.unwrap().is_none());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_response_for_unknown_event_is_rejected(pool: PgPool) {
        let store = PgStore::new(pool);

        let err = store.create_response(answer("ghost", "Alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation { .. }));
        assert!(store.get_responses_by_event("ghost").await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_created_at_advances_within_one_transaction(pool: PgPool) {
        let store = PgStore::new(pool.clone());
        store.create_event(practice("abc")).await.unwrap();

        let mut tx = pool.begin().await.unwrap();
        for name in ["Alice", "Bob"] {
            sqlx::query(
                "INSERT INTO practice_scheduler.responses (event_id, participant_name, selected_slots) \
                 VALUES ($1, $2, '[]'::jsonb)",
            )
            .bind("abc")
            .bind(name)
            .execute(&mut *tx)
            .await
            .unwrap();
        }
        tx.commit().await.unwrap();

        let responses = store.get_responses_by_event("abc").await.unwrap();
        assert_eq!(responses.len(), 2);
        assert!(responses[0].created_at < responses[1].created_at);
        assert_eq!(responses[0].participant_name, "Alice");
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_grouped_read_and_cascade(pool: PgPool) {
        let store = PgStore::new(pool);
        store.create_event(practice("abc")).await.unwrap();

        let empty = store.get_event_with_responses("abc").await.unwrap().unwrap();
        assert!(empty.responses.is_empty());

        for name in ["Alice", "Bob", "Carol"] {
            store.create_response(answer("abc", name)).await.unwrap();
        }

        let grouped = store.get_event_with_responses("abc").await.unwrap().unwrap();
        let names: Vec<_> = grouped
            .responses
            .iter()
            .map(|r| r.participant_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

        assert!(store.delete_event("abc").await.unwrap());
        assert!(store.get_responses_by_event("abc").await.unwrap().is_empty());
        assert!(!store.delete_event("abc").await.unwrap());
    }
}
