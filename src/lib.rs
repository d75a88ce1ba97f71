//! Printstack - layered settings resolution for machine configuration stacks
//!
//! A machine is a global stack plus one extruder stack per toolhead. Each stack
//! is a fixed sequence of override containers (user changes, quality changes,
//! quality, material, variant, definition changes) over a read-only definition,
//! and the effective value of a setting is the first layer that defines it.
//! Extruder stacks fall back to their global stack.
//!
//! `StackBuilder` creates complete machines from a definition id, choosing the
//! variant, material, and quality through pluggable catalogs, and publishes them
//! to a `ContainerRegistry`.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod registry;

// Re-exports for convenience
pub use application::StackBuilder;
pub use config::{ConfigWarning, EngineConfig};
pub use domain::entities::{
    Container, ContainerStack, Definition, ExtruderStack, GlobalStack, Metadata, SettingValue,
};
pub use domain::ports::{MaterialLookup, QualityGroup, QualityLookup, VariantLookup};
pub use domain::services::{ResolvedSetting, SettingResolver};
pub use domain::value_objects::{ContainerType, ExtruderPosition, Slot};
pub use error::{StackError, StackResult};
pub use infrastructure::{InMemoryMaterialCatalog, InMemoryQualityCatalog, InMemoryVariantCatalog};
pub use registry::{ContainerQuery, ContainerRegistry, EntryKind, NameScope, RegistryEntry};
