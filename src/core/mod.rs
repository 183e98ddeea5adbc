pub mod editor;
pub mod filter;
pub mod grouping;
pub mod language;
pub mod sync;
pub mod view;

pub use crate::domain::model::{
    Binding, Bus, CardConfig, DeviceBindings, EditTarget, EntitySnapshot, EntityState,
    HostContext, SlotDefinition, UnitSpec,
};
pub use crate::domain::ports::{ConfigChangeListener, EntitySnapshotProvider, HostCapabilities};
pub use crate::utils::error::Result;
