// Domain layer: service records, supervisor events and the ports the engine talks through.

pub mod model;
pub mod ports;
