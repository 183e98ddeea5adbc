use crate::core::view::{CAN_DEVICE_ELEMENT, UART_DEVICE_ELEMENT};
use crate::domain::model::EditTarget;
use crate::utils::validation::validate_identifier;

impl EditTarget {
    /// Map a picker's element id (device selectors) or data-id (slots) to an edit target.
    pub fn from_element(element_id: &str) -> Option<Self> {
        match element_id {
            CAN_DEVICE_ELEMENT => Some(EditTarget::CanDevice),
            UART_DEVICE_ELEMENT => Some(EditTarget::UartDevice),
            slot_id => validate_identifier("element", slot_id)
                .ok()
                .map(|_| EditTarget::Slot(slot_id.to_string())),
        }
    }

    pub fn element_id(&self) -> &str {
        match self {
            EditTarget::CanDevice => CAN_DEVICE_ELEMENT,
            EditTarget::UartDevice => UART_DEVICE_ELEMENT,
            EditTarget::Slot(slot_id) => slot_id,
        }
    }
}
