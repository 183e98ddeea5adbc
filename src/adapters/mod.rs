// Adapters layer: translate host-shaped data and events into domain types.

pub mod events;
pub mod hass;
pub mod host;
