// Domain layer: records, classification rules and the service ports the
// workflows are written against.

pub mod classify;
pub mod model;
pub mod ports;
