use crate::domain::model::{Binding, CardConfig, EditTarget, SlotDefinition};
use indexmap::IndexMap;

/// Merge one field edit into `current` and return the next configuration.
///
/// `None` (or an empty string) clears a device selector, and stores
/// [`Binding::Unbound`] for a slot. The entity map is always rebuilt in
/// catalog order, which also drops bindings for slots the catalog does not know.
pub fn apply_edit(
    current: &CardConfig,
    slots: &[SlotDefinition],
    target: &EditTarget,
    value: Option<String>,
) -> CardConfig {
    let value = value.filter(|v| !v.is_empty());
    let mut next = current.clone();

    match target {
        EditTarget::CanDevice => next.can_device = value,
        EditTarget::UartDevice => next.uart_device = value,
        EditTarget::Slot(slot_id) => {
            next.entities.insert(slot_id.clone(), Binding::from(value));
        }
    }

    next.entities = order_by_catalog(next.entities, slots);
    next
}

/// Rebuild `entities` following catalog order, keeping only slots present in both.
pub fn order_by_catalog(
    mut entities: IndexMap<String, Binding>,
    slots: &[SlotDefinition],
) -> IndexMap<String, Binding> {
    let ordered: IndexMap<String, Binding> = slots
        .iter()
        .filter_map(|slot| {
            entities
                .shift_remove(&slot.id)
                .map(|binding| (slot.id.clone(), binding))
        })
        .collect();

    for (slot_id, binding) in &entities {
        tracing::info!(
            slot = %slot_id,
            entity = binding.entity_id().unwrap_or("-"),
            "Dropping binding for slot not in catalog"
        );
    }
    ordered
}
