pub mod event;
pub mod response;

pub use event::{Event, EventRow, EventWithResponses, NewEvent};
pub use response::{EventResponse, EventResponseRow, NewEventResponse};

use validator::ValidationError;

/// Rejects empty or whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Rejects lists that contain empty or whitespace-only entries.
pub(crate) fn no_blank_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|value| value.trim().is_empty()) {
        let mut err = ValidationError::new("blank_entry");
        err.message = Some("entries must not be blank".into());
        return Err(err);
    }
    Ok(())
}
