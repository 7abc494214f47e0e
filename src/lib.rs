pub mod adapters;
pub mod carriers;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::ReqwestTransport;
pub use config::UpsConfig;
pub use core::{CarrierRegistry, ShippingService};
pub use domain::model::{CarrierCode, RateRequest, RateResponse};
pub use domain::ports::{Clock, HttpTransport, SystemClock};
pub use utils::error::{AppError, Result};
