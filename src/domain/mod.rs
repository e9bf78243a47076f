// Domain layer: ticket types and the ports a host test framework implements.

pub mod model;
pub mod ports;
