// Domain layer: preference data, the match set and the ports the engine depends on.

pub mod model;
pub mod ports;
