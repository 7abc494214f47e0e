pub mod registry;
pub mod shipping;

pub use registry::CarrierRegistry;
pub use shipping::ShippingService;
