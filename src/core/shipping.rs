use crate::core::registry::CarrierRegistry;
use crate::domain::model::{CarrierCode, RateRequest, RateResponse};
use crate::utils::error::{AppError, Result};

/// Top-level dispatch: resolves the carrier's adapter and forwards the rate
/// request to its rate service.
pub struct ShippingService {
    registry: CarrierRegistry,
}

impl ShippingService {
    pub fn new(registry: CarrierRegistry) -> Self {
        Self { registry }
    }

    pub async fn get_rates(
        &self,
        carrier: CarrierCode,
        request: &RateRequest,
    ) -> Result<RateResponse> {
        let adapter = self.registry.get(carrier)?;
        let rate_service =
            adapter
                .rate_service
                .as_ref()
                .ok_or_else(|| AppError::Validation {
                    message: format!("carrier does not support rate shopping: {carrier}"),
                    issues: Vec::new(),
                })?;
        rate_service.get_rates(request).await
    }
}
