use crate::domain::model::{CarrierCode, RateRequest, RateResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Transport failures, distinguished from a successful non-2xx response.
/// Timeout and network failure carry their own identity so upper layers can
/// classify them; anything else is opaque.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("network request failed: {0}")]
    Network(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// Injectable time source so token expiry is testable with a fixed clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[async_trait]
pub trait RateService: Send + Sync {
    async fn get_rates(&self, request: &RateRequest) -> Result<RateResponse>;
}

/// Bundles a carrier identity with its optional rate capability.
pub struct CarrierAdapter {
    pub carrier: CarrierCode,
    pub rate_service: Option<Arc<dyn RateService>>,
}

impl std::fmt::Debug for CarrierAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarrierAdapter")
            .field("carrier", &self.carrier)
            .field("rate_service", &self.rate_service.as_ref().map(|_| "<dyn RateService>"))
            .finish()
    }
}
