//! Container stack entity
//!
//! The fixed, named slots every stack has. Slots hold container ids, never the
//! containers themselves: the `ContainerRegistry` owns every container and the
//! `SettingResolver` looks them up on demand, so assigning several slots before
//! a read only ever exposes the final state.

use crate::domain::value_objects::{ContainerType, Slot};
use crate::error::{StackError, StackResult};

use super::{Container, Definition, Metadata};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerStack {
    id: String,
    name: String,
    metadata: Metadata,
    user_changes: String,
    quality_changes: String,
    quality: String,
    material: String,
    variant: String,
    definition_changes: String,
    definition: String,
}

impl ContainerStack {
    /// A stack over `definition` with every override slot set to its empty sentinel.
    pub fn new(id: impl Into<String>, definition: &Definition) -> Self {
        let id = id.into();
        let empty = |slot: Slot| slot.empty_container_id().unwrap_or_default().to_string();
        Self {
            name: id.clone(),
            id,
            metadata: Metadata::new(),
            user_changes: empty(Slot::UserChanges),
            quality_changes: empty(Slot::QualityChanges),
            quality: empty(Slot::Quality),
            material: empty(Slot::Material),
            variant: empty(Slot::Variant),
            definition_changes: empty(Slot::DefinitionChanges),
            definition: definition.id().to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_entry(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn set_metadata_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Id of the container currently in `slot`.
    pub fn slot(&self, slot: Slot) -> &str {
        match slot {
            Slot::UserChanges => &self.user_changes,
            Slot::QualityChanges => &self.quality_changes,
            Slot::Quality => &self.quality,
            Slot::Material => &self.material,
            Slot::Variant => &self.variant,
            Slot::DefinitionChanges => &self.definition_changes,
            Slot::Definition => &self.definition,
        }
    }

    /// Id of the bottom definition.
    pub fn definition_id(&self) -> &str {
        &self.definition
    }

    /// Slots paired with their container ids, highest priority first.
    pub fn layers(&self) -> impl Iterator<Item = (Slot, &str)> {
        Slot::ALL.into_iter().map(move |slot| (slot, self.slot(slot)))
    }

    /// Put `container` in `slot`, rejecting containers whose `type` disagrees.
    ///
    /// Registry membership is untouched.
    pub fn set_slot(&mut self, slot: Slot, container: &Container) -> StackResult<()> {
        let expected = slot.expected_type();
        if container.container_type() != Some(expected) || expected == ContainerType::Definition {
            return Err(StackError::SlotTypeMismatch {
                slot,
                expected,
                actual: container.declared_type().unwrap_or("<none>").to_string(),
                container: container.id().to_string(),
            });
        }
        *self.slot_mut(slot) = container.id().to_string();
        Ok(())
    }

    pub fn set_definition(&mut self, definition: &Definition) {
        self.definition = definition.id().to_string();
    }

    /// Re-point `slot` at its empty sentinel. Returns false for the definition
    /// slot, which is never empty.
    pub fn clear_slot(&mut self, slot: Slot) -> bool {
        match slot.empty_container_id() {
            Some(empty) => {
                *self.slot_mut(slot) = empty.to_string();
                true
            }
            None => false,
        }
    }

    /// True when `slot` holds its empty sentinel.
    pub fn is_slot_empty(&self, slot: Slot) -> bool {
        slot.empty_container_id() == Some(self.slot(slot))
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut String {
        match slot {
            Slot::UserChanges => &mut self.user_changes,
            Slot::QualityChanges => &mut self.quality_changes,
            Slot::Quality => &mut self.quality,
            Slot::Material => &mut self.material,
            Slot::Variant => &mut self.variant,
            Slot::DefinitionChanges => &mut self.definition_changes,
            Slot::Definition => &mut self.definition,
        }
    }
}
