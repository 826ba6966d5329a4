// Domain layer: catalog, request/result models and ports. No I/O here.

pub mod catalog;
pub mod model;
pub mod ports;
