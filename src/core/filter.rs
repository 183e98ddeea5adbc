use crate::domain::model::{entity_domain, Bus, DeviceBindings, EntitySnapshot, EntityState, SlotDefinition};

const SELECT_DOMAIN: &str = "select";

/// Entity ids from `snapshot` that may be bound to `slot`, in snapshot order.
///
/// An entity is kept only when every rule holds:
/// 1. bus slots need a device bound for that bus, and the entity must belong to it;
/// 2. the entity's domain matches `slot.domain` when one is set;
/// 3. the entity's unit is one of the slot's units (not checked for `select` entities).
pub fn eligible_entities(
    slot: &SlotDefinition,
    devices: &DeviceBindings,
    snapshot: &EntitySnapshot,
) -> Vec<String> {
    let candidates: Vec<String> = snapshot
        .iter()
        .filter(|(entity_id, state)| is_eligible(slot, devices, entity_id, state))
        .map(|(entity_id, _)| entity_id.to_string())
        .collect();

    tracing::debug!(
        slot = %slot.id,
        candidates = candidates.len(),
        total = snapshot.len(),
        "Filtered entity candidates"
    );
    candidates
}

fn is_eligible(
    slot: &SlotDefinition,
    devices: &DeviceBindings,
    entity_id: &str,
    state: &EntityState,
) -> bool {
    if slot.device != Bus::None {
        // 沒有綁定裝置時，此匯流排的 slot 一律沒有候選
        let Some(device_id) = devices.for_bus(slot.device) else {
            return false;
        };
        if state.device_id.as_deref() != Some(device_id) {
            return false;
        }
    }

    let domain = entity_domain(entity_id);
    if let Some(required) = &slot.domain {
        if required != domain {
            return false;
        }
    }

    if domain == SELECT_DOMAIN {
        return true;
    }
    state
        .unit
        .as_deref()
        .is_some_and(|unit| slot.unit.accepts(unit))
}
