//! Setting resolver
//!
//! Resolves the effective value of a setting by walking a stack's slots from
//! highest to lowest priority. Override slots are asked for *local* values only;
//! the bottom definition is asked through its inheritance chain. An extruder
//! stack that misses everywhere falls back once to its global stack's chain.
//!
//! Nothing is cached: every call reads the registry as it is now.

use std::collections::HashSet;

use crate::domain::entities::{ContainerStack, ExtruderStack, GlobalStack, SettingValue};
use crate::domain::value_objects::{ExtruderPosition, Slot};
use crate::error::{StackError, StackResult};
use crate::registry::{ContainerRegistry, RegistryEntry};

/// A resolved value and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSetting {
    pub value: SettingValue,
    /// Stack whose layer supplied the value (the global stack on extruder fallback)
    pub stack_id: String,
    pub slot: Slot,
    /// Container or definition id that defines the value
    pub source_id: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SettingResolver<'a> {
    registry: &'a ContainerRegistry,
}

impl<'a> SettingResolver<'a> {
    pub fn new(registry: &'a ContainerRegistry) -> Self {
        Self { registry }
    }

    /// Effective value of `key` on the registered stack `stack_id`.
    pub fn resolve(&self, stack_id: &str, key: &str) -> StackResult<SettingValue> {
        self.resolve_with_source(stack_id, key).map(|r| r.value)
    }

    pub fn resolve_with_source(&self, stack_id: &str, key: &str) -> StackResult<ResolvedSetting> {
        match self.registry.get(stack_id) {
            Some(RegistryEntry::GlobalStack(global)) => self.resolve_global(global, key),
            Some(RegistryEntry::ExtruderStack(extruder)) => self.resolve_extruder(extruder, key),
            _ => Err(StackError::UnknownStack {
                id: stack_id.to_string(),
            }),
        }
    }

    pub fn resolve_global(&self, global: &GlobalStack, key: &str) -> StackResult<ResolvedSetting> {
        self.resolve_stack(global.stack(), key)?
            .ok_or_else(|| StackError::UndefinedSetting {
                key: key.to_string(),
                stack: global.id().to_string(),
            })
    }

    /// Resolve on the extruder's own slots, then on its global stack's slots.
    ///
    /// The fallback is one level deep: the global stack does not chain further.
    pub fn resolve_extruder(
        &self,
        extruder: &ExtruderStack,
        key: &str,
    ) -> StackResult<ResolvedSetting> {
        if let Some(found) = self.resolve_stack(extruder.stack(), key)? {
            return Ok(found);
        }

        let parent_id = extruder
            .next_stack()
            .ok_or_else(|| StackError::NoParentStack {
                stack: extruder.id().to_string(),
            })?;
        let parent = self
            .registry
            .global_stack(parent_id)
            .ok_or_else(|| StackError::UnknownStack {
                id: parent_id.to_string(),
            })?;

        self.resolve_stack(parent.stack(), key)?
            .ok_or_else(|| StackError::UndefinedSetting {
                key: key.to_string(),
                stack: extruder.id().to_string(),
            })
    }

    /// Walk one stack's slots. `Ok(None)` means no layer, definition included, has `key`.
    pub fn resolve_stack(
        &self,
        stack: &ContainerStack,
        key: &str,
    ) -> StackResult<Option<ResolvedSetting>> {
        for slot in Slot::OVERRIDES {
            let container_id = stack.slot(slot);
            let container =
                self.registry
                    .container(container_id)
                    .ok_or_else(|| StackError::UnknownContainer {
                        id: container_id.to_string(),
                    })?;
            if let Some(value) = container.local_value(key) {
                return Ok(Some(ResolvedSetting {
                    value: value.clone(),
                    stack_id: stack.id().to_string(),
                    slot,
                    source_id: container_id.to_string(),
                }));
            }
        }

        Ok(self
            .find_definition_default(stack.definition_id(), key)?
            .map(|(source_id, value)| ResolvedSetting {
                value: value.clone(),
                stack_id: stack.id().to_string(),
                slot: Slot::Definition,
                source_id: source_id.to_string(),
            }))
    }

    /// Default of `key` declared by `definition_id` or the nearest definition it inherits from.
    pub fn definition_value(
        &self,
        definition_id: &str,
        key: &str,
    ) -> StackResult<Option<&'a SettingValue>> {
        Ok(self
            .find_definition_default(definition_id, key)?
            .map(|(_, value)| value))
    }

    /// `key` resolved on every extruder of `global`, in position order.
    pub fn extruder_values(
        &self,
        global: &GlobalStack,
        key: &str,
    ) -> StackResult<Vec<(ExtruderPosition, SettingValue)>> {
        let mut values = Vec::with_capacity(global.extruder_count());
        for (position, extruder_id) in global.extruders() {
            let extruder =
                self.registry
                    .extruder_stack(extruder_id)
                    .ok_or_else(|| StackError::UnknownStack {
                        id: extruder_id.clone(),
                    })?;
            values.push((*position, self.resolve_extruder(extruder, key)?.value));
        }
        Ok(values)
    }

    fn find_definition_default(
        &self,
        definition_id: &str,
        key: &str,
    ) -> StackResult<Option<(&'a str, &'a SettingValue)>> {
        let registry = self.registry;
        let mut seen: HashSet<String> = HashSet::new();
        let mut current = registry
            .definition(definition_id)
            .ok_or_else(|| StackError::UnknownContainer {
                id: definition_id.to_string(),
            })?;

        loop {
            if !seen.insert(current.id().to_string()) {
                return Err(StackError::CircularDefinition {
                    id: current.id().to_string(),
                });
            }
            if let Some(value) = current.local_default(key) {
                return Ok(Some((current.id(), value)));
            }
            let Some(parent_id) = current.inherits() else {
                return Ok(None);
            };
            current = registry
                .definition(parent_id)
                .ok_or_else(|| StackError::UnknownContainer {
                    id: parent_id.to_string(),
                })?;
        }
    }
}
