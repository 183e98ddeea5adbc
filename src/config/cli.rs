use crate::domain::model::EditTarget;
use crate::utils::error::{EditorError, Result};
use crate::utils::validation::{validate_language_code, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hpsu-card-editor")]
#[command(about = "Resolve entity pickers and bindings for the HPSU dashboard card")]
pub struct CliConfig {
    #[arg(long, help = "Slot catalog TOML file (defaults to the built-in HPSU catalog)")]
    pub catalog: Option<PathBuf>,

    #[arg(long, help = "Editor settings TOML file")]
    pub settings: Option<PathBuf>,

    #[arg(long, help = "Hub snapshot JSON file with `states` and `entities` objects")]
    pub states: PathBuf,

    #[arg(long, help = "Card configuration JSON file")]
    pub config: PathBuf,

    #[arg(long, default_value = "en")]
    pub language: String,

    #[arg(long = "set", value_name = "TARGET=VALUE", help = "Apply an edit, e.g. t_flow=sensor.flow or can-device-selector=dev1")]
    pub edits: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Parse every `--set` argument into an element id and an optional value.
    pub fn parsed_edits(&self) -> Result<Vec<(String, Option<String>)>> {
        self.edits
            .iter()
            .map(|edit| {
                let (target, value) =
                    edit.split_once('=')
                        .ok_or_else(|| EditorError::InvalidConfigValueError {
                            field: "set".to_string(),
                            value: edit.clone(),
                            reason: "Expected TARGET=VALUE".to_string(),
                        })?;
                let value = (!value.is_empty()).then(|| value.to_string());
                Ok((target.to_string(), value))
            })
            .collect()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_language_code("language", &self.language)?;
        for (target, _) in self.parsed_edits()? {
            if EditTarget::from_element(&target).is_none() {
                return Err(EditorError::InvalidConfigValueError {
                    field: "set".to_string(),
                    value: target,
                    reason: "Target must be a slot id or a device selector".to_string(),
                });
            }
        }
        Ok(())
    }
}
