use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::sync::Semaphore;

use crate::domain::datetime::resolve_local;
use crate::domain::{
    BookingGateway, BookingRequest, CheckResponse, Clock, CreateResponse, GatewayError, LocalZone,
};

// Fixed time source so slot assertions are deterministic.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(y, m, d, h, min, 0)
                .single()
                .expect("valid utc instant"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// Named zone pinned for tests regardless of the machine's TZ.
pub(crate) struct FixedZone(pub(crate) Tz);

impl FixedZone {
    pub(crate) fn berlin() -> Self {
        Self(chrono_tz::Europe::Berlin)
    }

    pub(crate) fn utc() -> Self {
        Self(chrono_tz::UTC)
    }
}

impl LocalZone for FixedZone {
    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        resolve_local(&self.0, local)
    }

    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.0).naive_local()
    }
}

// Scripted backend that records every request it receives.
#[derive(Clone, Default)]
pub(crate) struct RecordingGateway {
    requests: Arc<Mutex<Vec<BookingRequest>>>,
    check_replies: Arc<Mutex<VecDeque<Result<CheckResponse, GatewayError>>>>,
    create_replies: Arc<Mutex<VecDeque<Result<CreateResponse, GatewayError>>>>,
    // When set, each call blocks until a permit is released.
    gate: Option<Arc<Semaphore>>,
}

impl RecordingGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub(crate) fn with_check(self, reply: Result<CheckResponse, GatewayError>) -> Self {
        self.check_replies
            .lock()
            .expect("replies mutex poisoned")
            .push_back(reply);
        self
    }

    pub(crate) fn with_create(self, reply: Result<CreateResponse, GatewayError>) -> Self {
        self.create_replies
            .lock()
            .expect("replies mutex poisoned")
            .push_back(reply);
        self
    }

    pub(crate) fn requests(&self) -> Vec<BookingRequest> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }

    async fn record(&self, req: BookingRequest) {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(req);
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
    }
}

#[async_trait]
impl BookingGateway for RecordingGateway {
    async fn check(&self, req: BookingRequest) -> Result<CheckResponse, GatewayError> {
        self.record(req).await;
        self.check_replies
            .lock()
            .expect("replies mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Network("no scripted reply".to_string())))
    }

    async fn create(&self, req: BookingRequest) -> Result<CreateResponse, GatewayError> {
        self.record(req).await;
        self.create_replies
            .lock()
            .expect("replies mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Network("no scripted reply".to_string())))
    }
}

pub(crate) fn available(message: &str) -> Result<CheckResponse, GatewayError> {
    Ok(CheckResponse {
        room_available: true,
        message: message.to_string(),
    })
}

pub(crate) fn created(message: &str) -> Result<CreateResponse, GatewayError> {
    Ok(CreateResponse {
        message: message.to_string(),
    })
}
