use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{no_blank_entries, not_blank};

/// Payload accepted when a participant answers an event.
///
/// `eventId` comes from the request path and overrides anything in the body;
/// `id` and `createdAt` are server-assigned.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEventResponse {
    #[serde(rename = "eventId", default)]
    #[validate(custom(function = "not_blank"))]
    pub event_id: String,
    #[serde(rename = "participantName")]
    #[validate(custom(function = "not_blank"))]
    pub participant_name: String,
    #[serde(rename = "selectedSlots")]
    #[validate(custom(function = "no_blank_entries"))]
    pub selected_slots: Vec<String>,
}

/// Row in `practice_scheduler.responses`.
#[derive(Debug, Clone, FromRow)]
pub struct EventResponseRow {
    pub id: Uuid,
    pub event_id: String,
    pub participant_name: String,
    pub selected_slots: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// One participant's availability for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub event_id: String,
    pub participant_name: String,
    pub selected_slots: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EventResponseRow> for EventResponse {
    fn from(row: EventResponseRow) -> Self {
        Self {
            id: row.id,
            event_id: row.event_id,
            participant_name: row.participant_name,
            selected_slots: row.selected_slots.0,
            created_at: row.created_at,
        }
    }
}

impl EventResponse {
    pub fn from_new(new_response: NewEventResponse, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            event_id: new_response.event_id,
            participant_name: new_response.participant_name,
            selected_slots: new_response.selected_slots,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_without_event_id_parses() {
        let response: NewEventResponse = serde_json::from_value(json!({
            "participantName": "Alice",
            "selectedSlots": ["9am"]
        }))
        .unwrap();

        assert!(response.event_id.is_empty());
        assert!(response.validate().is_err());
    }

    #[test]
    fn test_empty_selection_is_allowed() {
        let response = NewEventResponse {
            event_id: "abc".into(),
            participant_name: "Bob".into(),
            selected_slots: Vec::new(),
        };
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let response = NewEventResponse {
            event_id: "abc".into(),
            participant_name: String::new(),
            selected_slots: vec!["9am".into()],
        };

        let errors = response.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("participantName"));
    }

    #[test]
    fn test_whitespace_name_and_blank_slot_use_json_names() {
        let response = NewEventResponse {
            event_id: "abc".into(),
            participant_name: "   ".into(),
            selected_slots: vec!["9am".into(), " ".into()],
        };

        let errors = response.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("participantName"));
        assert!(fields.contains_key("selectedSlots"));
        assert!(!fields.contains_key("selected_slots"));
    }

    #[test]
    fn test_row_maps_to_response() {
        let id = Uuid::new_v4();
        let row = EventResponseRow {
            id,
            event_id: "abc".into(),
            participant_name: "Alice".into(),
            selected_slots: Json(vec!["9am".into()]),
            created_at: Utc::now(),
        };

        let response = EventResponse::from(row);
        assert_eq!(response.id, id);
        assert_eq!(response.selected_slots, vec!["9am"]);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["participantName"], "Alice");
        assert_eq!(value["eventId"], "abc");
    }
}
