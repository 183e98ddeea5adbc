use crate::config::catalog::Catalog;
use crate::config::settings::LabelSettings;
use crate::core::filter::eligible_entities;
use crate::core::grouping::group_by_category;
use crate::domain::model::{CardConfig, EntitySnapshot, LocalizedText};
use crate::utils::error::Result;
use serde::Serialize;

pub const CAN_DEVICE_ELEMENT: &str = "can-device-selector";
pub const UART_DEVICE_ELEMENT: &str = "uart-device-selector";

/// Descriptor tree handed to the host's widget layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditorView {
    pub devices: Option<DevicePanelView>,
    pub groups: Vec<GroupView>,
}

impl EditorView {
    pub fn is_empty(&self) -> bool {
        self.devices.is_none() && self.groups.is_empty()
    }

    pub fn group(&self, label: &str) -> Option<&GroupView> {
        self.groups.iter().find(|group| group.label == label)
    }

    pub fn picker(&self, slot_id: &str) -> Option<&SlotPickerView> {
        self.groups
            .iter()
            .flat_map(|group| group.pickers.iter())
            .find(|picker| picker.slot_id == slot_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevicePanelView {
    pub header: String,
    pub can: DevicePickerView,
    pub uart: DevicePickerView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevicePickerView {
    pub element_id: &'static str,
    pub placeholder: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub label: String,
    pub pickers: Vec<SlotPickerView>,
}

impl GroupView {
    pub fn slot_ids(&self) -> Vec<&str> {
        self.pickers.iter().map(|p| p.slot_id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotPickerView {
    pub slot_id: String,
    pub placeholder: String,
    pub candidates: Vec<String>,
    pub value: Option<String>,
}

fn localized(text: &LocalizedText, language: &str, fallback: &str) -> String {
    text.get(language)
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

/// Build the full descriptor tree for one render pass.
pub fn render_view(
    catalog: &Catalog,
    config: &CardConfig,
    snapshot: &EntitySnapshot,
    language: &str,
    labels: &LabelSettings,
) -> Result<EditorView> {
    let devices = config.device_bindings();
    let panel = &catalog.panel;

    let device_panel = DevicePanelView {
        header: localized(&panel.header, language, &labels.missing_text),
        can: DevicePickerView {
            element_id: CAN_DEVICE_ELEMENT,
            placeholder: localized(&panel.can_placeholder, language, &labels.missing_text),
            value: config.can_device.clone(),
        },
        uart: DevicePickerView {
            element_id: UART_DEVICE_ELEMENT,
            placeholder: localized(&panel.uart_placeholder, language, &labels.missing_text),
            value: config.uart_device.clone(),
        },
    };

    let groups = group_by_category(catalog.slots(), language, labels)?
        .into_iter()
        .map(|group| GroupView {
            label: group.label,
            pickers: group
                .slots
                .into_iter()
                .map(|slot| SlotPickerView {
                    slot_id: slot.id.clone(),
                    placeholder: localized(&slot.texts, language, &labels.missing_text),
                    candidates: eligible_entities(slot, &devices, snapshot),
                    value: config
                        .binding(&slot.id)
                        .and_then(|binding| binding.entity_id())
                        .map(str::to_string),
                })
                .collect(),
        })
        .collect();

    Ok(EditorView {
        devices: Some(device_panel),
        groups,
    })
}
