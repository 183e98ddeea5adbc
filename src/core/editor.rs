use crate::config::card::parse_card_config;
use crate::config::catalog::Catalog;
use crate::config::settings::EditorSettings;
use crate::core::language::resolve_language;
use crate::core::sync::{apply_edit, order_by_catalog};
use crate::core::view::{render_view, EditorView};
use crate::domain::model::{CardConfig, EditTarget, EntitySnapshot, HostContext};
use crate::domain::ports::{ConfigChangeListener, EntitySnapshotProvider};
use crate::utils::error::{EditorError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Unconfigured,
    Configured(CardConfig),
}

/// Owns the editor state and drives load, language and edit events.
pub struct EditorController<L: ConfigChangeListener> {
    catalog: Catalog,
    settings: EditorSettings,
    language: String,
    state: EditorState,
    listener: L,
}

impl<L: ConfigChangeListener> EditorController<L> {
    pub fn new(catalog: Catalog, settings: EditorSettings, listener: L) -> Self {
        let language = settings.default_language().to_string();
        Self {
            catalog,
            settings,
            language,
            state: EditorState::Unconfigured,
            listener,
        }
    }

    /// Like [`EditorController::new`], but rejects a catalog that lacks
    /// labels in the default language.
    pub fn try_new(catalog: Catalog, settings: EditorSettings, listener: L) -> Result<Self> {
        catalog.validate_for(&settings)?;
        Ok(Self::new(catalog, settings, listener))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.state, EditorState::Configured(_))
    }

    pub fn config(&self) -> Option<&CardConfig> {
        match &self.state {
            EditorState::Configured(config) => Some(config),
            EditorState::Unconfigured => None,
        }
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Validate `raw` and make it the current configuration. On error the
    /// previous state stays as it was.
    pub fn load_configuration(&mut self, context: &HostContext, raw: &Value) -> Result<()> {
        if !context.is_ready() {
            return Err(EditorError::CapabilityUnavailable {
                message: "entity pickers are not loaded".to_string(),
            });
        }

        let mut config = parse_card_config(raw).inspect_err(|e| {
            tracing::warn!("Rejected card configuration: {}", e);
        })?;
        config.entities = order_by_catalog(config.entities, self.catalog.slots());

        tracing::info!(
            bindings = config.entities.len(),
            can_device = config.can_device.as_deref().unwrap_or("-"),
            uart_device = config.uart_device.as_deref().unwrap_or("-"),
            "Card configuration loaded"
        );
        self.state = EditorState::Configured(config);
        Ok(())
    }

    /// Switch the label language. Labels are resolved on every render.
    pub fn set_language(&mut self, code: &str) {
        let language = resolve_language(code, &self.settings.language);
        if language != self.language {
            tracing::debug!(from = %self.language, to = %language, "Language changed");
            self.language = language;
        }
    }

    /// Fail when any catalog label is missing for the active language.
    pub fn validate_labels(&self) -> Result<()> {
        self.catalog.check_labels(&self.language)
    }

    /// Apply one user edit and notify the listener with the full next configuration.
    pub fn handle_edit(&mut self, target: EditTarget, value: Option<String>) -> Result<()> {
        let EditorState::Configured(current) = &self.state else {
            return Err(EditorError::NotConfigured);
        };
        if let EditTarget::Slot(slot_id) = &target {
            if !self.catalog.contains(slot_id) {
                return Err(EditorError::UnknownSlot {
                    slot_id: slot_id.clone(),
                });
            }
        }

        let next = apply_edit(current, self.catalog.slots(), &target, value);
        tracing::debug!(edit = ?target, "Applied edit");
        self.listener.on_config_changed(&next);
        self.state = EditorState::Configured(next);
        Ok(())
    }

    /// Host UI event: element id (or slot data-id) plus the picked value.
    pub fn handle_element_event(&mut self, element_id: &str, value: Option<String>) -> Result<()> {
        let target = EditTarget::from_element(element_id).ok_or_else(|| EditorError::UnknownSlot {
            slot_id: element_id.to_string(),
        })?;
        self.handle_edit(target, value)
    }

    pub fn render(&self, snapshot: &EntitySnapshot) -> Result<EditorView> {
        match &self.state {
            EditorState::Unconfigured => Ok(EditorView::default()),
            EditorState::Configured(config) => render_view(
                &self.catalog,
                config,
                snapshot,
                &self.language,
                &self.settings.labels,
            ),
        }
    }

    pub fn render_from<P: EntitySnapshotProvider>(&self, provider: &P) -> Result<EditorView> {
        let snapshot = provider.snapshot();
        self.render(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Binding;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder(Vec<CardConfig>);

    impl ConfigChangeListener for Recorder {
        fn on_config_changed(&mut self, config: &CardConfig) {
            self.0.push(config.clone());
        }
    }

    fn controller() -> EditorController<Recorder> {
        EditorController::new(
            Catalog::builtin().unwrap(),
            EditorSettings::default(),
            Recorder::default(),
        )
    }

    #[test]
    fn test_starts_unconfigured_with_empty_view() {
        let editor = controller();
        assert!(!editor.is_configured());
        assert!(editor.render(&EntitySnapshot::new()).unwrap().is_empty());
    }

    #[test]
    fn test_try_new_rejects_catalog_without_default_labels() {
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

        let result = EditorController::try_new(catalog, EditorSettings::default(), Recorder::default());
        assert!(matches!(result, Err(EditorError::MissingCategoryLabel { .. })));

        assert!(EditorController::try_new(
            Catalog::builtin().unwrap(),
            EditorSettings::default(),
            Recorder::default()
        )
        .is_ok());
    }

    #[test]
    fn test_edit_before_load_is_rejected() {
        let mut editor = controller();
        let result = editor.handle_edit(EditTarget::CanDevice, Some("can1".to_string()));
        assert!(matches!(result, Err(EditorError::NotConfigured)));
        assert!(editor.listener().0.is_empty());
    }

    #[test]
    fn test_load_requires_ready_context() {
        let mut editor = controller();
        let result = editor.load_configuration(&HostContext::unavailable(), &json!({}));
        assert!(matches!(result, Err(EditorError::CapabilityUnavailable { .. })));
        assert!(!editor.is_configured());
    }

    #[test]
    fn test_failed_reload_keeps_previous_config() {
        let mut editor = controller();
        let context = HostContext::ready();
        editor
            .load_configuration(&context, &json!({"canDevice": "can1"}))
            .unwrap();

        assert!(editor
            .load_configuration(&context, &json!({"canDevice": 7}))
            .is_err());
        assert_eq!(editor.config().unwrap().can_device.as_deref(), Some("can1"));
    }

    #[test]
    fn test_load_orders_and_drops_orphans() {
        let mut editor = controller();
        editor
            .load_configuration(
                &HostContext::ready(),
                &json!({"entities": {"t_return": "sensor.r", "legacy": "sensor.l", "t_outside": "sensor.o"}}),
            )
            .unwrap();
        assert_eq!(editor.config().unwrap().entity_keys(), vec!["t_outside", "t_return"]);
    }

    #[test]
    fn test_unknown_slot_edit_rejected_without_notification() {
        let mut editor = controller();
        editor.load_configuration(&HostContext::ready(), &json!({})).unwrap();

        let result = editor.handle_edit(EditTarget::Slot("nope".to_string()), None);
        assert!(matches!(result, Err(EditorError::UnknownSlot { .. })));
        assert!(editor.listener().0.is_empty());
    }

    #[test]
    fn test_element_event_routes_to_target() {
        let mut editor = controller();
        editor.load_configuration(&HostContext::ready(), &json!({})).unwrap();

        editor
            .handle_element_event("uart-device-selector", Some("uart1".to_string()))
            .unwrap();
        editor
            .handle_element_event("heat_output", Some("sensor.heat".to_string()))
            .unwrap();

        let config = editor.config().unwrap();
        assert_eq!(config.uart_device.as_deref(), Some("uart1"));
        assert_eq!(
            config.binding("heat_output"),
            Some(&Binding::Bound("sensor.heat".to_string()))
        );
        assert_eq!(editor.listener().0.len(), 2);
        assert_eq!(editor.listener().0[1], *config);
    }

    #[test]
    fn test_language_change_regroups() {
        let mut editor = controller();
        editor.load_configuration(&HostContext::ready(), &json!({})).unwrap();
        let snapshot = EntitySnapshot::new();

        let view = editor.render(&snapshot).unwrap();
        assert_eq!(view.groups[0].label, "Temperatures");

        editor.set_language("de-CH");
        assert_eq!(editor.language(), "de");
        let view = editor.render(&snapshot).unwrap();
        assert_eq!(view.groups[0].label, "Temperaturen");

        editor.set_language("xx-YY");
        assert_eq!(editor.language(), "en");
        assert!(editor.validate_labels().is_ok());
    }
}
