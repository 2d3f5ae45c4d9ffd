use thiserror::Error;

// Rejected "HH.MM" text or out-of-range time components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOfDayError {
    #[error("expected a time written as HH.MM, got {0:?}")]
    Malformed(String),
    #[error("hour {0} is outside 0-23")]
    HourOutOfRange(u8),
    #[error("minute {0} is not on a quarter hour")]
    MinuteNotQuarter(u8),
}

// Building a request from a selection that is not submittable.
// Callers gate on `is_submittable`, so hitting this is a contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selection is missing {missing} and cannot be submitted")]
pub struct InvalidState {
    pub missing: &'static str,
}

// Failures from the booking backend boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("booking backend unreachable: {0}")]
    Network(String),
    #[error("booking backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
    #[error("booking backend response could not be decoded: {0}")]
    Decode(String),
}
