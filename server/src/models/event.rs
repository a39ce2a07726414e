use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use super::{no_blank_entries, not_blank, EventResponse};

/// Payload accepted when creating an event. `createdAt` is server-assigned.
// Per-field renames: validator reports these names, it ignores `rename_all`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEvent {
    #[validate(custom(function = "not_blank"))]
    pub id: String,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(
        length(min = 1, message = "at least one date is required"),
        custom(function = "no_blank_entries")
    )]
    pub dates: Vec<String>,
    #[validate(
        length(min = 1, message = "at least one time slot is required"),
        custom(function = "no_blank_entries")
    )]
    #[serde(rename = "timeSlots")]
    pub time_slots: Vec<String>,
}

/// Row in `practice_scheduler.events`.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub dates: Json<Vec<String>>,
    pub time_slots: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub dates: Vec<String>,
    pub time_slots: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            dates: row.dates.0,
            time_slots: row.time_slots.0,
            created_at: row.created_at,
        }
    }
}

impl Event {
    /// Materializes a new event the way the database default would.
    pub fn from_new(new_event: NewEvent, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new_event.id,
            title: new_event.title,
            dates: new_event.dates,
            time_slots: new_event.time_slots,
            created_at,
        }
    }
}

/// An event together with every response submitted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWithResponses {
    #[serde(flatten)]
    pub event: Event,
    pub responses: Vec<EventResponse>,
}
