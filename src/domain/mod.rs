// Domain layer: normalized shipping models, ports (interfaces) and input
// validation. Carrier wire formats live with their adapters, not here.

pub mod model;
pub mod ports;
pub mod validation;
