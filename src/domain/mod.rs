// Domain layer: transient request-scoped models and the ports the form and the endpoint talk to.

pub mod model;
pub mod ports;
