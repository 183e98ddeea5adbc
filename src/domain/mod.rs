// Domain layer: catalog/config models and ports (interfaces). No IO here; adapters live under src/adapters.

pub mod model;
pub mod ports;
