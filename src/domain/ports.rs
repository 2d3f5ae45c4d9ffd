use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::booking::{BookingRequest, CheckResponse, CreateResponse};
use crate::domain::errors::GatewayError;

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// Port for the user's wall-clock zone. Offsets are resolved at the instant
// being converted, never at "now".
pub trait LocalZone: Send + Sync {
    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc>;
    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime;
}

// The screen controller depends on this trait, not the reqwest client.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn check(&self, req: BookingRequest) -> Result<CheckResponse, GatewayError>;
    async fn create(&self, req: BookingRequest) -> Result<CreateResponse, GatewayError>;
}
