//! Pure translation between the normalized rate model and the UPS wire
//! schemas. No I/O here; the rate service owns the network round trips.

use crate::carriers::ups::wire::{
    Code, Party, RateRequestBody, RequestOptions, Shipment, UpsErrorEnvelope, UpsRateRequest,
    UpsRateResponse, UpsTokenResponse, WireAddress, WireDimensions, WirePackage, WireWeight,
};
use crate::domain::model::{
    Address, CarrierCode, Money, Package, RateQuote, RateRequest, RateResponse,
};
use crate::utils::error::{AppError, CarrierFault, FieldIssue, Result};
use serde_json::Value;

/// UPS generic packaging type ("customer supplied package").
const PACKAGING_TYPE_CODE: &str = "02";

pub fn service_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "01" => "UPS Next Day Air",
        "02" => "UPS 2nd Day Air",
        "03" => "UPS Ground",
        "12" => "UPS 3 Day Select",
        "13" => "UPS Next Day Air Saver",
        "14" => "UPS Next Day Air Early",
        "59" => "UPS 2nd Day Air AM",
        "65" => "UPS Saver",
        _ => return None,
    };
    Some(name)
}

/// Builds the UPS rating payload. The ship-from block falls back to the
/// shipper address when the request carries no explicit origin; the shipper
/// block additionally carries the account number when one is configured.
pub fn build_rate_request(request: &RateRequest, account_number: Option<&str>) -> UpsRateRequest {
    let ship_from = request.ship_from.as_ref().unwrap_or(&request.shipper);

    let mut shipper = map_party(&request.shipper);
    shipper.shipper_number = account_number.map(str::to_string);

    UpsRateRequest {
        rate_request: RateRequestBody {
            request: RequestOptions {
                request_option: "Rate".to_string(),
            },
            shipment: Shipment {
                shipper,
                ship_to: map_party(&request.ship_to),
                ship_from: map_party(ship_from),
                packages: request.packages.iter().map(map_package).collect(),
                service: request.service_code.as_deref().map(Code::new),
            },
        },
    }
}

fn map_party(address: &Address) -> Party {
    let address_line = match &address.address2 {
        Some(line2) => vec![address.address1.clone(), line2.clone()],
        None => vec![address.address1.clone()],
    };

    Party {
        address: WireAddress {
            address_line,
            city: address.city.clone(),
            state_province_code: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country_code: address.country_code.clone(),
        },
        name: address.name.clone().or_else(|| address.company.clone()),
        shipper_number: None,
    }
}

fn map_package(package: &Package) -> WirePackage {
    WirePackage {
        packaging_type: Code::new(PACKAGING_TYPE_CODE),
        dimensions: package.dimensions.as_ref().map(|d| WireDimensions {
            unit_of_measurement: Code::new(d.unit.code()),
            length: decimal_string(d.length),
            width: decimal_string(d.width),
            height: decimal_string(d.height),
        }),
        package_weight: WireWeight {
            unit_of_measurement: Code::new(package.weight.unit.code()),
            weight: decimal_string(package.weight.value),
        },
    }
}

// Integral values serialize without a trailing ".0", so 2.0 becomes "2".
fn decimal_string(value: f64) -> String {
    format!("{value}")
}

/// Parses and validates a UPS rating response body into normalized quotes.
/// An empty quote list is legitimate here; whether zero rated shipments is a
/// business failure is the caller's question, not the mapper's.
pub fn parse_rate_response(body: &str) -> Result<RateResponse> {
    let value: Value = serde_json::from_str(body).map_err(|e| AppError::MalformedResponse {
        message: "UPS rate response was not valid JSON".to_string(),
        issues: Vec::new(),
        source: Some(e),
    })?;

    let parsed: UpsRateResponse =
        serde_json::from_value(value).map_err(|e| AppError::MalformedResponse {
            message: "UPS rate response did not match expected schema".to_string(),
            issues: vec![FieldIssue::new("RateResponse", e.to_string())],
            source: None,
        })?;

    let quotes = parsed
        .rate_response
        .rated_shipment
        .into_vec()
        .into_iter()
        .map(|shipment| RateQuote {
            carrier: CarrierCode::Ups,
            service_name: service_name(&shipment.service.code).map(str::to_string),
            service_code: shipment.service.code,
            total_charge: Money {
                amount: shipment.total_charges.monetary_value,
                currency: shipment.total_charges.currency_code,
            },
            delivery_days: shipment
                .guaranteed_delivery
                .and_then(|d| d.business_days_in_transit.trim().parse().ok()),
        })
        .collect();

    Ok(RateResponse { quotes })
}

/// Parses and validates an OAuth token response body, collecting one issue
/// per missing or mistyped field.
pub fn parse_token_response(body: &str) -> Result<UpsTokenResponse> {
    let value: Value = serde_json::from_str(body).map_err(|e| AppError::MalformedResponse {
        message: "UPS OAuth response was not valid JSON".to_string(),
        issues: Vec::new(),
        source: Some(e),
    })?;

    let mut issues = Vec::new();

    let access_token = match value.get("access_token").and_then(Value::as_str) {
        Some(token) => token.to_string(),
        None => {
            issues.push(FieldIssue::new("access_token", "expected a string"));
            String::new()
        }
    };
    let token_type = match value.get("token_type").and_then(Value::as_str) {
        Some(kind) => kind.to_string(),
        None => {
            issues.push(FieldIssue::new("token_type", "expected a string"));
            String::new()
        }
    };
    let expires_in = match value.get("expires_in").and_then(Value::as_f64) {
        Some(seconds) => seconds,
        None => {
            issues.push(FieldIssue::new("expires_in", "expected a number"));
            0.0
        }
    };

    if !issues.is_empty() {
        return Err(AppError::MalformedResponse {
            message: "UPS OAuth response did not match expected schema".to_string(),
            issues,
            source: None,
        });
    }

    Ok(UpsTokenResponse {
        access_token,
        token_type,
        expires_in,
    })
}

/// Best-effort extraction of a carrier-reported error from either the REST
/// error envelope or the SOAP-fault shape. Never fails; `None` means the
/// body is not JSON or matches neither shape. Used only to enrich an
/// already-detected error status.
pub fn extract_carrier_error(body: &str) -> Option<CarrierFault> {
    let envelope: UpsErrorEnvelope = serde_json::from_str(body).ok()?;

    if let Some(first) = envelope
        .response
        .and_then(|r| r.errors)
        .and_then(|errors| errors.into_iter().next())
    {
        return Some(CarrierFault {
            code: first.code,
            message: first.message,
        });
    }

    let primary = envelope
        .fault?
        .detail?
        .errors?
        .error_detail?
        .primary_error_code?;
    Some(CarrierFault {
        code: primary.code,
        message: primary.description,
    })
}
