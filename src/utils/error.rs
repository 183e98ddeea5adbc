use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Category '{category}' has no label for language '{language}'")]
    MissingCategoryLabel { category: String, language: String },

    #[error("Editor has no configuration loaded")]
    NotConfigured,

    #[error("Unknown slot: {slot_id}")]
    UnknownSlot { slot_id: String },

    #[error("Host capability unavailable: {message}")]
    CapabilityUnavailable { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EditorError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EditorError::UnknownSlot { .. } | EditorError::MissingCategoryLabel { .. } => {
                ErrorSeverity::Low
            }
            EditorError::NotConfigured | EditorError::CapabilityUnavailable { .. } => {
                ErrorSeverity::Medium
            }
            EditorError::ConfigValidationError { .. }
            | EditorError::InvalidConfigValueError { .. }
            | EditorError::MissingConfigError { .. }
            | EditorError::SerializationError(_) => ErrorSeverity::High,
            EditorError::CatalogError { .. } | EditorError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EditorError::IoError(_) => "Check that the file exists and is readable",
            EditorError::SerializationError(_) => "Check the JSON syntax of the input file",
            EditorError::ConfigValidationError { .. }
            | EditorError::InvalidConfigValueError { .. } => {
                "Fix the card configuration; entity bindings must map slot ids to entity ids"
            }
            EditorError::MissingConfigError { .. } => "Add the missing field to the configuration",
            EditorError::CatalogError { .. } => "Fix the slot catalog definition",
            EditorError::MissingCategoryLabel { .. } => {
                "Add a label for the active language to the category, or disable strict labels"
            }
            EditorError::NotConfigured => "Load a card configuration before editing",
            EditorError::UnknownSlot { .. } => "Use a slot id defined in the catalog",
            EditorError::CapabilityUnavailable { .. } => "Retry once the host has finished loading",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EditorError::ConfigValidationError { field, message } => {
                format!("The card configuration is invalid ({}): {}", field, message)
            }
            EditorError::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
            EditorError::UnknownSlot { slot_id } => {
                format!("There is no slot named '{}' on this card", slot_id)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
