//! Serde types for the UPS rating and OAuth wire schemas. These mirror the
//! carrier's JSON exactly; translation to and from the normalized domain
//! model lives in [`super::mapper`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rate request (outbound)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsRateRequest {
    #[serde(rename = "RateRequest")]
    pub rate_request: RateRequestBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRequestBody {
    #[serde(rename = "Request")]
    pub request: RequestOptions,
    #[serde(rename = "Shipment")]
    pub shipment: Shipment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestOptions {
    #[serde(rename = "RequestOption")]
    pub request_option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment {
    #[serde(rename = "Shipper")]
    pub shipper: Party,
    #[serde(rename = "ShipTo")]
    pub ship_to: Party,
    #[serde(rename = "ShipFrom")]
    pub ship_from: Party,
    #[serde(rename = "Package")]
    pub packages: Vec<WirePackage>,
    #[serde(rename = "Service", skip_serializing_if = "Option::is_none")]
    pub service: Option<Code>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Party {
    #[serde(rename = "Address")]
    pub address: WireAddress,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "ShipperNumber", skip_serializing_if = "Option::is_none")]
    pub shipper_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireAddress {
    /// One line, or two when the address carries a second line.
    #[serde(rename = "AddressLine")]
    pub address_line: Vec<String>,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "StateProvinceCode")]
    pub state_province_code: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
    #[serde(rename = "CountryCode")]
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WirePackage {
    #[serde(rename = "PackagingType")]
    pub packaging_type: Code,
    #[serde(rename = "Dimensions", skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<WireDimensions>,
    #[serde(rename = "PackageWeight")]
    pub package_weight: WireWeight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireDimensions {
    #[serde(rename = "UnitOfMeasurement")]
    pub unit_of_measurement: Code,
    #[serde(rename = "Length")]
    pub length: String,
    #[serde(rename = "Width")]
    pub width: String,
    #[serde(rename = "Height")]
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireWeight {
    #[serde(rename = "UnitOfMeasurement")]
    pub unit_of_measurement: Code,
    #[serde(rename = "Weight")]
    pub weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Code {
    #[serde(rename = "Code")]
    pub code: String,
}

impl Code {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

// ---------------------------------------------------------------------------
// Rate response (inbound)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct UpsRateResponse {
    #[serde(rename = "RateResponse")]
    pub rate_response: RateResponseBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateResponseBody {
    #[serde(rename = "RatedShipment")]
    pub rated_shipment: OneOrMany<RatedShipment>,
}

/// UPS serializes a lone rated shipment as a bare object and several as an
/// array; both normalize to a vec before mapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatedShipment {
    #[serde(rename = "Service")]
    pub service: ServiceRef,
    #[serde(rename = "TotalCharges")]
    pub total_charges: TotalCharges,
    #[serde(rename = "GuaranteedDelivery")]
    pub guaranteed_delivery: Option<GuaranteedDelivery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRef {
    #[serde(rename = "Code")]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TotalCharges {
    #[serde(rename = "CurrencyCode")]
    pub currency_code: String,
    #[serde(rename = "MonetaryValue")]
    pub monetary_value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuaranteedDelivery {
    #[serde(rename = "BusinessDaysInTransit")]
    pub business_days_in_transit: String,
}

// ---------------------------------------------------------------------------
// OAuth token response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct UpsTokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds. Any JSON number is accepted, fractional values
    /// included; bounds are enforced where the expiry instant is computed.
    pub expires_in: f64,
}

// ---------------------------------------------------------------------------
// Error envelopes; every field optional, extraction is best-effort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct UpsErrorEnvelope {
    pub response: Option<RestErrorBody>,
    #[serde(rename = "Fault")]
    pub fault: Option<Fault>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestErrorBody {
    pub errors: Option<Vec<RestError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestError {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fault {
    pub detail: Option<FaultDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaultDetail {
    #[serde(rename = "Errors")]
    pub errors: Option<FaultErrors>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaultErrors {
    #[serde(rename = "ErrorDetail")]
    pub error_detail: Option<FaultErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaultErrorDetail {
    #[serde(rename = "PrimaryErrorCode")]
    pub primary_error_code: Option<PrimaryErrorCode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryErrorCode {
    #[serde(rename = "Code")]
    pub code: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}
