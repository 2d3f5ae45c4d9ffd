// Domain layer: slot arithmetic, selection rules and the booking payloads.

pub mod booking;
pub mod datetime;
pub mod errors;
pub mod ports;
pub mod selection;
pub mod slots;
pub mod time_of_day;

pub use booking::{BookingRequest, CheckResponse, CreateResponse};
pub use errors::{GatewayError, InvalidState, TimeOfDayError};
pub use ports::{BookingGateway, Clock, LocalZone};
pub use selection::SelectionState;
pub use time_of_day::TimeOfDay;
