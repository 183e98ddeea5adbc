pub mod card;
pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub use card::parse_card_config;
pub use catalog::{Catalog, DevicePanelTexts};
pub use settings::{EditorSettings, LabelSettings, LanguageSettings};
