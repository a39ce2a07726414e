use axum::extract::Path;
use axum::response::Response;
use tracing::{debug, info};

use crate::models::NewEventResponse;
use crate::state::Store;
use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::utils::validation::{validate, JsonBody};

pub async fn create_response(
    Store(store): Store,
    Path(event_id): Path<String>,
    JsonBody(mut payload): JsonBody<NewEventResponse>,
) -> Result<Response, AppError> {
    // The path decides which event is answered, whatever the body says.
    payload.event_id = event_id;
    debug!(?payload, "Submitting response");
    validate(&payload)?;

    let response = store.create_response(payload).await?;
    info!(
        response_id = %response.id,
        event_id = %response.event_id,
        "Response created"
    );

    Ok(success(response))
}
