use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language code → label
pub type LocalizedText = BTreeMap<String, String>;

/// Which physical bus a slot is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bus {
    #[default]
    None,
    Can,
    Uart,
}

/// Accepted unit(s) of measurement for a slot. A bare string is a one-element set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitSpec {
    One(String),
    Many(Vec<String>),
}

impl Default for UnitSpec {
    fn default() -> Self {
        UnitSpec::Many(Vec::new())
    }
}

impl UnitSpec {
    pub fn units(&self) -> &[String] {
        match self {
            UnitSpec::One(unit) => std::slice::from_ref(unit),
            UnitSpec::Many(units) => units,
        }
    }

    pub fn accepts(&self, unit: &str) -> bool {
        self.units().iter().any(|u| u == unit)
    }

    pub fn is_empty(&self) -> bool {
        self.units().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub id: String,
    #[serde(default)]
    pub device: Bus,
    pub domain: Option<String>,
    #[serde(default)]
    pub unit: UnitSpec,
    /// None 表示沿用前一個 slot 的分類
    pub category: Option<LocalizedText>,
    #[serde(default)]
    pub texts: LocalizedText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityState {
    pub unit: Option<String>,
    pub device_id: Option<String>,
}

/// Point-in-time view of the hub's entities, in the hub's iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entities: IndexMap<String, EntityState>,
}

impl EntitySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity_id: impl Into<String>, state: EntityState) {
        self.entities.insert(entity_id.into(), state);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityState)> {
        self.entities.iter().map(|(id, state)| (id.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Domain prefix of an entity id (text before the first '.'), empty when there is no '.'.
pub fn entity_domain(entity_id: &str) -> &str {
    entity_id.split_once('.').map(|(domain, _)| domain).unwrap_or("")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBindings {
    pub can: Option<String>,
    pub uart: Option<String>,
}

impl DeviceBindings {
    pub fn for_bus(&self, bus: Bus) -> Option<&str> {
        match bus {
            Bus::None => None,
            Bus::Can => self.can.as_deref(),
            Bus::Uart => self.uart.as_deref(),
        }
    }
}

/// Value stored for a slot key. `Unbound` is an explicit "cleared" choice
/// (serialized as `null`); a missing key means the slot was never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Binding {
    Unbound,
    Bound(String),
}

impl Binding {
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Binding::Unbound => None,
            Binding::Bound(id) => Some(id),
        }
    }
}

impl From<Option<String>> for Binding {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(id) if !id.is_empty() => Binding::Bound(id),
            _ => Binding::Unbound,
        }
    }
}

impl From<Binding> for Option<String> {
    fn from(value: Binding) -> Self {
        match value {
            Binding::Unbound => None,
            Binding::Bound(id) => Some(id),
        }
    }
}

/// Persisted card configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uart_device: Option<String>,
    #[serde(default)]
    pub entities: IndexMap<String, Binding>,
    /// 其他卡片欄位 (例如 `type`) 原樣保留
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CardConfig {
    pub fn device_bindings(&self) -> DeviceBindings {
        DeviceBindings {
            can: self.can_device.clone(),
            uart: self.uart_device.clone(),
        }
    }

    pub fn binding(&self, slot_id: &str) -> Option<&Binding> {
        self.entities.get(slot_id)
    }

    pub fn entity_keys(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }
}

/// Which field a user edit targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditTarget {
    CanDevice,
    UartDevice,
    Slot(String),
}

/// Proof that the host finished loading the picker components. Only the
/// bootstrap layer creates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostContext {
    pickers_loaded: bool,
}

impl HostContext {
    pub fn ready() -> Self {
        Self {
            pickers_loaded: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            pickers_loaded: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.pickers_loaded
    }
}
