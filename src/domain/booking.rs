use serde::{Deserialize, Serialize};

use crate::domain::time_of_day::TimeOfDay;

// Serde derives here leak the wire format into the domain. The backend owns the
// shape, and mirroring it one-to-one keeps the mapping trivial.

// Payload posted to the booking backend for both checks and creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub headcount: u32,
    pub is_create: bool,
    // ISO-8601 UTC instants, e.g. "2024-05-01T07:00:00.000Z".
    pub start_date_time: String,
    pub end_date_time: String,
}

// Reply to an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub room_available: bool,
    pub message: String,
}

// Reply to a create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub message: String,
}
