use axum::extract::Path;
use axum::response::Response;
use tracing::{debug, info};

use crate::models::NewEvent;
use crate::state::Store;
use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::utils::validation::{validate, JsonBody};

pub async fn create_event(
    Store(store): Store,
    JsonBody(payload): JsonBody<NewEvent>,
) -> Result<Response, AppError> {
    debug!(?payload, "Creating event");
    validate(&payload)?;

    let event = store.create_event(payload).await?;
    info!(event_id = %event.id, "Event created");

    Ok(success(event))
}

pub async fn get_event(Store(store): Store, Path(id): Path<String>) -> Result<Response, AppError> {
    let event = store
        .get_event(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    Ok(success(event))
}

pub async fn get_event_group(
    Store(store): Store,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let grouped = store
        .get_event_with_responses(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    debug!(event_id = %id, responses = grouped.responses.len(), "Loaded event group");
    Ok(success(grouped))
}
