use crate::config::settings::EditorSettings;
use crate::domain::model::{LocalizedText, SlotDefinition};
use crate::utils::error::{EditorError, Result};
use crate::utils::validation::{validate_identifier, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("hpsu_catalog.toml");

/// Texts of the device selection panel shown above the slot groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePanelTexts {
    pub header: LocalizedText,
    pub can_placeholder: LocalizedText,
    pub uart_placeholder: LocalizedText,
}

impl Default for DevicePanelTexts {
    fn default() -> Self {
        let text = |value: &str| LocalizedText::from([("en".to_string(), value.to_string())]);
        Self {
            header: text("HPSU Devices"),
            can_placeholder: text("Select CAN device"),
            uart_placeholder: text("Select UART device"),
        }
    }
}

/// Ordered, read-only list of slots. Catalog order is the order used for
/// grouping, rendering and persisting bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub panel: DevicePanelTexts,
    #[serde(rename = "slot", default)]
    slots: Vec<SlotDefinition>,
}

impl Catalog {
    pub fn new(slots: Vec<SlotDefinition>) -> Result<Self> {
        let catalog = Self {
            panel: DevicePanelTexts::default(),
            slots,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// 內建的 HPSU 目錄
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EditorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(content).map_err(|e| EditorError::CatalogError {
            message: format!("TOML parsing error: {}", e),
        })?;
        catalog.validate()?;
        tracing::debug!("Loaded catalog with {} slots", catalog.slots.len());
        Ok(catalog)
    }

    pub fn slots(&self) -> &[SlotDefinition] {
        &self.slots
    }

    pub fn get(&self, slot_id: &str) -> Option<&SlotDefinition> {
        self.slots.iter().find(|slot| slot.id == slot_id)
    }

    pub fn contains(&self, slot_id: &str) -> bool {
        self.get(slot_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Labels must exist in the default language; other languages may fall back to placeholders.
    pub fn validate_for(&self, settings: &EditorSettings) -> Result<()> {
        self.check_labels(settings.default_language())
    }

    /// Check that every category and slot text has a label for `language`.
    pub fn check_labels(&self, language: &str) -> Result<()> {
        for slot in &self.slots {
            if let Some(category) = &slot.category {
                if !category.contains_key(language) {
                    return Err(EditorError::MissingCategoryLabel {
                        category: describe_category(category),
                        language: language.to_string(),
                    });
                }
            }
            if !slot.texts.contains_key(language) {
                return Err(EditorError::CatalogError {
                    message: format!(
                        "Slot '{}' has no text for language '{}'",
                        slot.id, language
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Stable name for a category in error messages: its labels joined in language order.
pub(crate) fn describe_category(category: &LocalizedText) -> String {
    category
        .iter()
        .map(|(lang, label)| format!("{}={}", lang, label))
        .collect::<Vec<_>>()
        .join(",")
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        let first = self.slots.first().ok_or_else(|| EditorError::CatalogError {
            message: "Catalog has no slots".to_string(),
        })?;
        if first.category.is_none() {
            return Err(EditorError::CatalogError {
                message: format!("First slot '{}' must define a category", first.id),
            });
        }

        let mut seen = HashSet::new();
        for slot in &self.slots {
            validate_identifier("slot.id", &slot.id)?;
            if !seen.insert(slot.id.as_str()) {
                return Err(EditorError::CatalogError {
                    message: format!("Duplicate slot id '{}'", slot.id),
                });
            }
            // select entities carry no unit
            if slot.unit.is_empty() && slot.domain.as_deref() != Some("select") {
                return Err(EditorError::CatalogError {
                    message: format!("Slot '{}' accepts no unit", slot.id),
                });
            }
            if matches!(&slot.category, Some(category) if category.is_empty()) {
                return Err(EditorError::CatalogError {
                    message: format!("Slot '{}' has an empty category", slot.id),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Bus, UnitSpec};

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.check_labels("en").is_ok());
        assert!(catalog.check_labels("de").is_ok());

        let mode = catalog.get("operating_mode").unwrap();
        assert_eq!(mode.domain.as_deref(), Some("select"));
        assert_eq!(mode.device, Bus::Can);
        assert!(mode.unit.is_empty());

        let energy = catalog.get("energy_total").unwrap();
        assert_eq!(energy.device, Bus::None);
        assert!(energy.unit.accepts("Wh"));
    }

    #[test]
    fn test_first_slot_requires_category() {
        let result = Catalog::from_toml_str(
            r#"
[[slot]]
id = "a"
unit = "°C"
texts = { en = "A" }
"#,
        );
        assert!(matches!(result, Err(EditorError::CatalogError { .. })));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let slot = SlotDefinition {
            id: "a".to_string(),
            device: Bus::None,
            domain: None,
            unit: UnitSpec::One("W".to_string()),
            category: Some(LocalizedText::from([("en".to_string(), "X".to_string())])),
            texts: LocalizedText::new(),
        };
        let result = Catalog::new(vec![slot.clone(), slot]);
        assert!(matches!(result, Err(EditorError::CatalogError { .. })));
    }

    #[test]
    fn test_missing_unit_rejected_outside_select() {
        let result = Catalog::from_toml_str(
            r#"
[[slot]]
id = "a"
domain = "sensor"
category = { en = "X" }
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_without_default_language_labels_rejected() {
        let catalog = Catalog::from_toml_str(
            r#"
[[slot]]
id = "a"
unit = "W"
category = { de = "Leistung" }
texts = { de = "A" }
"#,
        )
        .unwrap();

        assert!(matches!(
            catalog.validate_for(&EditorSettings::default()),
            Err(EditorError::MissingCategoryLabel { ref language, .. }) if language == "en"
        ));

        let german = EditorSettings::from_toml_str(
            "[language]\ndefault = \"de\"\nsupported = [\"en\", \"de\"]\n",
        )
        .unwrap();
        assert!(catalog.validate_for(&german).is_ok());
    }

    #[test]
    fn test_check_labels_reports_missing_language() {
        let catalog = Catalog::from_toml_str(
            r#"
[[slot]]
id = "a"
unit = "W"
category = { en = "Power" }
texts = { en = "A", de = "A" }
"#,
        )
        .unwrap();

        assert!(catalog.check_labels("en").is_ok());
        assert!(matches!(
            catalog.check_labels("de"),
            Err(EditorError::MissingCategoryLabel { .. })
        ));
    }
}
