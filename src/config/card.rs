use crate::domain::model::CardConfig;
use crate::utils::error::{EditorError, Result};
use crate::utils::validation::{validate_entity_id, validate_identifier};
use serde_json::Value;

fn invalid(field: &str, message: impl Into<String>) -> EditorError {
    EditorError::ConfigValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_device_field(raw: &serde_json::Map<String, Value>, field: &str) -> Result<()> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(()),
        Some(Value::String(_)) => Err(invalid(field, "device id cannot be empty")),
        Some(other) => Err(invalid(
            field,
            format!("expected a device id string, found {}", kind_of(other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// 結構驗證卡片設定；不符合格式的值直接拒絕，不做型別轉換
///
/// Accepted shape: an object with optional `canDevice`/`uartDevice` strings and an
/// optional `entities` object mapping slot identifiers to entity ids (or `null`).
/// An empty string binding is read as an explicit unbind. Other top-level keys are kept.
pub fn parse_card_config(raw: &Value) -> Result<CardConfig> {
    let object = raw
        .as_object()
        .ok_or_else(|| invalid("config", format!("expected an object, found {}", kind_of(raw))))?;

    check_device_field(object, "canDevice")?;
    check_device_field(object, "uartDevice")?;

    match object.get("entities") {
        None | Some(Value::Null) => {}
        Some(Value::Object(entities)) => {
            for (slot_id, value) in entities {
                validate_identifier("entities", slot_id)?;
                match value {
                    Value::Null => {}
                    Value::String(entity_id) if entity_id.is_empty() => {}
                    Value::String(entity_id) => {
                        validate_entity_id(&format!("entities.{}", slot_id), entity_id)?
                    }
                    other => {
                        return Err(invalid(
                            &format!("entities.{}", slot_id),
                            format!("expected an entity id, found {}", kind_of(other)),
                        ))
                    }
                }
            }
        }
        Some(other) => {
            return Err(invalid(
                "entities",
                format!("expected an object, found {}", kind_of(other)),
            ))
        }
    }

    let mut normalized = object.clone();
    if matches!(normalized.get("entities"), Some(Value::Null)) {
        normalized.remove("entities");
    }
    Ok(serde_json::from_value(Value::Object(normalized))?)
}
