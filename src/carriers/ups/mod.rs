pub mod auth;
pub mod mapper;
pub mod rate_service;
pub mod wire;

pub use auth::UpsOAuthClient;
pub use rate_service::UpsRateService;

use crate::config::UpsConfig;
use crate::domain::model::CarrierCode;
use crate::domain::ports::{CarrierAdapter, Clock, HttpTransport};
use std::sync::Arc;

/// Wires the OAuth client and rate service into a registrable adapter. The
/// clock is injectable so token expiry stays deterministic under test.
pub fn create_adapter<T, C>(transport: Arc<T>, config: UpsConfig, clock: C) -> CarrierAdapter
where
    T: HttpTransport + 'static,
    C: Clock + 'static,
{
    let auth = UpsOAuthClient::new(Arc::clone(&transport), config.clone(), clock);
    let rate_service = UpsRateService::new(transport, auth, config);

    CarrierAdapter {
        carrier: CarrierCode::Ups,
        rate_service: Some(Arc::new(rate_service)),
    }
}
