// Domain layer: core models, ports (interfaces) and the per-field conversions.

pub mod model;
pub mod ports;

pub mod services;
