use crate::domain::model::{CardConfig, EntitySnapshot, HostContext};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to the hub's live entities. Each call is one consistent read.
pub trait EntitySnapshotProvider {
    fn snapshot(&self) -> Arc<EntitySnapshot>;
}

impl EntitySnapshotProvider for Arc<EntitySnapshot> {
    fn snapshot(&self) -> Arc<EntitySnapshot> {
        Arc::clone(self)
    }
}

/// Receives the full configuration after every accepted edit.
pub trait ConfigChangeListener {
    fn on_config_changed(&mut self, config: &CardConfig);
}

impl<F> ConfigChangeListener for F
where
    F: FnMut(&CardConfig),
{
    fn on_config_changed(&mut self, config: &CardConfig) {
        self(config)
    }
}

/// Bootstrap-side access to the host environment.
#[async_trait]
pub trait HostCapabilities: Send + Sync {
    async fn acquire_context(&self) -> Result<HostContext>;
}
