// Domain layer: feed schema, presentation model, styling rules and ports.

pub mod model;
pub mod ports;
pub mod style;
