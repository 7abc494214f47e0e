use crate::domain::model::CarrierCode;
use crate::domain::ports::CarrierAdapter;
use crate::utils::error::{AppError, Result};
use std::collections::HashMap;

/// Maps carrier codes to their registered adapters.
#[derive(Default)]
pub struct CarrierRegistry {
    adapters: HashMap<CarrierCode, CarrierAdapter>,
}

impl CarrierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, adapter: CarrierAdapter) {
        self.adapters.insert(adapter.carrier, adapter);
    }

    pub fn get(&self, carrier: CarrierCode) -> Result<&CarrierAdapter> {
        self.adapters
            .get(&carrier)
            .ok_or_else(|| AppError::Validation {
                message: format!("carrier not registered: {carrier}"),
                issues: Vec::new(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_of_an_unregistered_carrier_fails_with_validation() {
        let registry = CarrierRegistry::new();
        let err = registry.get(CarrierCode::Ups).unwrap_err();
        match err {
            AppError::Validation { message, .. } => assert!(message.contains("UPS")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn registration_makes_the_adapter_resolvable() {
        let mut registry = CarrierRegistry::new();
        registry.register(CarrierAdapter {
            carrier: CarrierCode::Ups,
            rate_service: None,
        });

        let adapter = registry.get(CarrierCode::Ups).unwrap();
        assert_eq!(adapter.carrier, CarrierCode::Ups);
    }
}
