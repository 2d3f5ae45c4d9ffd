use crate::domain::{BookingGateway, BookingRequest, CheckResponse, CreateResponse, GatewayError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

// Checks and creates share one endpoint; `isCreate` in the body tells them apart.
const BOOKINGS_CHECK_PATH: &str = "api/bookings/check";

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Error)]
pub enum BookingClientError {
    #[error("invalid booking api url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

// Thin reqwest client for the booking backend.
#[derive(Clone)]
pub struct BookingClient {
    http: Client,
    endpoint: Url,
}

impl BookingClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BookingClientError> {
        // A trailing slash makes `join` append to the base path instead of replacing it.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalized)
            .and_then(|base| base.join(BOOKINGS_CHECK_PATH))
            .map_err(|source| BookingClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                source,
            })?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post<T: DeserializeOwned>(&self, req: &BookingRequest) -> Result<T, GatewayError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(req)
            .send()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        let status = res.status();

        // Keep the upstream status and message; the controller decides what the user sees.
        if !status.is_success() {
            let message = res
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|payload| payload.message);
            return Err(GatewayError::Server {
                status: status.as_u16(),
                message,
            });
        }

        res.json::<T>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

#[async_trait]
impl BookingGateway for BookingClient {
    #[tracing::instrument(
        name = "booking_check",
        skip_all,
        fields(start = %req.start_time, end = %req.end_time, headcount = req.headcount)
    )]
    async fn check(&self, req: BookingRequest) -> Result<CheckResponse, GatewayError> {
        let reply = self.post::<CheckResponse>(&req).await?;
        tracing::debug!(room_available = reply.room_available, "check response received.");
        Ok(reply)
    }

    #[tracing::instrument(
        name = "booking_create",
        skip_all,
        fields(start = %req.start_time, end = %req.end_time, headcount = req.headcount)
    )]
    async fn create(&self, req: BookingRequest) -> Result<CreateResponse, GatewayError> {
        let reply = self.post::<CreateResponse>(&req).await?;
        tracing::debug!("create response received.");
        Ok(reply)
    }
}
