pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::host::{load_with_host, LocalHost};
pub use crate::config::{parse_card_config, Catalog, EditorSettings};
pub use crate::core::{
    editor::{EditorController, EditorState},
    filter::eligible_entities,
    grouping::group_by_category,
    language::resolve_language,
    sync::apply_edit,
    view::EditorView,
};
pub use crate::domain::model::{Binding, CardConfig, EditTarget, EntitySnapshot, HostContext};
pub use crate::utils::error::{EditorError, Result};
