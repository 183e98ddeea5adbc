use crate::domain::model::{EntitySnapshot, EntityState};
use crate::utils::error::{EditorError, Result};
use crate::utils::validation::validate_required_field;
use serde_json::Value;
use std::path::Path;

impl EntitySnapshot {
    /// Build a snapshot from the hub's `states` map and its entity registry.
    ///
    /// Snapshot order follows `states`. Only registry entries for entities
    /// that have a state are used.
    pub fn from_hass(states: &Value, registry: &Value) -> Result<Self> {
        let states = states
            .as_object()
            .ok_or_else(|| EditorError::ConfigValidationError {
                field: "states".to_string(),
                message: "expected an object keyed by entity id".to_string(),
            })?;
        let registry = match registry {
            Value::Null => None,
            Value::Object(entries) => Some(entries),
            _ => {
                return Err(EditorError::ConfigValidationError {
                    field: "entities".to_string(),
                    message: "expected an object keyed by entity id".to_string(),
                })
            }
        };

        let mut snapshot = EntitySnapshot::new();
        for (entity_id, state) in states {
            let unit = state
                .pointer("/attributes/unit_of_measurement")
                .and_then(Value::as_str)
                .map(str::to_string);
            let device_id = registry
                .and_then(|entries| entries.get(entity_id))
                .and_then(|entry| entry.get("device_id"))
                .and_then(Value::as_str)
                .map(str::to_string);
            snapshot.insert(entity_id.clone(), EntityState { unit, device_id });
        }

        tracing::debug!("Snapshot holds {} entities", snapshot.len());
        Ok(snapshot)
    }

    /// `{ "states": {...}, "entities": {...} }` as dumped from the hub.
    pub fn from_hub_json(value: &Value) -> Result<Self> {
        let states = *validate_required_field("states", &value.get("states"))?;
        let registry = value.get("entities").unwrap_or(&Value::Null);
        Self::from_hass(states, registry)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&content)?;
        Self::from_hub_json(&value)
    }
}
