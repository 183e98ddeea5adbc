use crate::core::editor::EditorController;
use crate::domain::model::HostContext;
use crate::domain::ports::{ConfigChangeListener, HostCapabilities};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Host for running outside the dashboard: picker components are always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHost;

#[async_trait]
impl HostCapabilities for LocalHost {
    async fn acquire_context(&self) -> Result<HostContext> {
        tokio::task::yield_now().await;
        Ok(HostContext::ready())
    }
}

/// Wait for the host context, then load `raw` into the editor.
/// The editor stays unconfigured until the wait has resolved.
pub async fn load_with_host<H, L>(
    host: &H,
    editor: &mut EditorController<L>,
    raw: &Value,
) -> Result<()>
where
    H: HostCapabilities + ?Sized,
    L: ConfigChangeListener,
{
    let context = host.acquire_context().await?;
    editor.load_configuration(&context, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Catalog, EditorSettings};
    use crate::domain::model::CardConfig;
    use crate::utils::error::EditorError;
    use serde_json::json;

    struct UnavailableHost;

    #[async_trait]
    impl HostCapabilities for UnavailableHost {
        async fn acquire_context(&self) -> Result<HostContext> {
            Err(EditorError::CapabilityUnavailable {
                message: "card helpers missing".to_string(),
            })
        }
    }

    fn editor() -> EditorController<impl FnMut(&CardConfig)> {
        EditorController::new(
            Catalog::builtin().unwrap(),
            EditorSettings::default(),
            |_: &CardConfig| {},
        )
    }

    #[tokio::test]
    async fn test_load_with_local_host() {
        let mut editor = editor();
        load_with_host(&LocalHost, &mut editor, &json!({"canDevice": "can1"}))
            .await
            .unwrap();
        assert!(editor.is_configured());
    }

    #[tokio::test]
    async fn test_failed_acquire_leaves_editor_unconfigured() {
        let mut editor = editor();
        let result = load_with_host(&UnavailableHost, &mut editor, &json!({})).await;
        assert!(matches!(
            result,
            Err(EditorError::CapabilityUnavailable { .. })
        ));
        assert!(!editor.is_configured());
    }
}
