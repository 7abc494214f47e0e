use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierCode {
    #[serde(rename = "UPS")]
    Ups,
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarrierCode::Ups => write!(f, "UPS"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "LBS")]
    Lbs,
    #[serde(rename = "KGS")]
    Kgs,
}

impl WeightUnit {
    pub fn code(&self) -> &'static str {
        match self {
            WeightUnit::Lbs => "LBS",
            WeightUnit::Kgs => "KGS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionUnit {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "CM")]
    Cm,
}

impl DimensionUnit {
    pub fn code(&self) -> &'static str {
        match self {
            DimensionUnit::In => "IN",
            DimensionUnit::Cm => "CM",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageWeight {
    pub value: f64,
    pub unit: WeightUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub unit: DimensionUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub weight: PackageWeight,
    pub dimensions: Option<PackageDimensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
    pub shipper: Address,
    /// Origin of the shipment when it differs from the shipper; the shipper
    /// address is used when absent.
    pub ship_from: Option<Address>,
    pub ship_to: Address,
    pub packages: Vec<Package>,
    /// Restricts the quote to one carrier service; all available services
    /// are returned when absent.
    pub service_code: Option<String>,
}

/// Monetary amount kept as the carrier's exact decimal string. Never parsed
/// into a float, so the representation survives round trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub carrier: CarrierCode,
    pub service_code: String,
    pub service_name: Option<String>,
    pub total_charge: Money,
    pub delivery_days: Option<u32>,
}

/// Quotes in the carrier's response order. May legitimately be empty when the
/// carrier rates zero shipments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResponse {
    pub quotes: Vec<RateQuote>,
}
