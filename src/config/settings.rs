use crate::utils::error::{EditorError, Result};
use crate::utils::validation::{validate_language_code, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorSettings {
    #[serde(default)]
    pub language: LanguageSettings,
    #[serde(default)]
    pub labels: LabelSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSettings {
    pub default: String,
    pub supported: Vec<String>,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            default: "en".to_string(),
            supported: vec!["en".to_string(), "de".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Picker placeholder when a slot has no text for the active language
    pub missing_text: String,
    /// Group header when a category has no label for the active language
    pub missing_category: String,
    /// Group for slots that appear before any category is defined
    pub ungrouped: String,
    /// 開發模式：缺少翻譯時直接回傳錯誤
    pub strict: bool,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            missing_text: "<missing>".to_string(),
            missing_category: "<missing>".to_string(),
            ungrouped: "Other".to_string(),
            strict: false,
        }
    }
}

impl EditorSettings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EditorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let settings: Self =
            toml::from_str(&processed_content).map_err(|e| EditorError::ConfigValidationError {
                field: "settings".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// 替換環境變數 (例如 ${HPSU_LANGUAGE})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn is_supported(&self, language: &str) -> bool {
        self.language.supported.iter().any(|l| l == language)
    }

    pub fn default_language(&self) -> &str {
        &self.language.default
    }
}

impl Validate for EditorSettings {
    fn validate(&self) -> Result<()> {
        validate_language_code("language.default", &self.language.default)?;
        for code in &self.language.supported {
            validate_language_code("language.supported", code)?;
        }
        if !self.is_supported(&self.language.default) {
            return Err(EditorError::InvalidConfigValueError {
                field: "language.default".to_string(),
                value: self.language.default.clone(),
                reason: format!(
                    "Default language must be one of: {}",
                    self.language.supported.join(", ")
                ),
            });
        }

        validate_non_empty_string("labels.missing_text", &self.labels.missing_text)?;
        validate_non_empty_string("labels.missing_category", &self.labels.missing_category)?;
        validate_non_empty_string("labels.ungrouped", &self.labels.ungrouped)?;
        Ok(())
    }
}
