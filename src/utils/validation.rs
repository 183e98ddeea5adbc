use crate::utils::error::{EditorError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("static pattern"))
}

fn entity_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9_]+\.[A-Za-z0-9_]+$").expect("static pattern"))
}

fn language_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{2,8}([-_][A-Za-z0-9]{1,8})*$").expect("static pattern"))
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EditorError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Slot ids: 以字母開頭，只允許英數字與底線
pub fn validate_identifier(field_name: &str, value: &str) -> Result<()> {
    if !identifier_pattern().is_match(value) {
        return Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Identifier must start with a letter and contain only letters, digits and '_'"
                .to_string(),
        });
    }
    Ok(())
}

/// Entity ids 的格式為 `<domain>.<object_id>`
pub fn validate_entity_id(field_name: &str, value: &str) -> Result<()> {
    if !entity_id_pattern().is_match(value) {
        return Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Entity id must have the form '<domain>.<object_id>'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_language_code(field_name: &str, value: &str) -> Result<()> {
    if !language_pattern().is_match(value) {
        return Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a language tag".to_string(),
        });
    }
    Ok(())
}
