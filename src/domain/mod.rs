// Domain layer: itinerary and catalog models plus the ports the core reads data through.

pub mod model;
pub mod ports;
