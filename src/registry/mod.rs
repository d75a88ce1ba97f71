//! Container registry
//!
//! The arena every container, definition, and stack lives in, keyed by id.
//! Stacks reference each other and their containers by id only, so the
//! global ⇄ extruder relationship never forms an ownership cycle.
//!
//! The registry is plain data with `&mut self` mutation: a multi-threaded host
//! serializes access by wrapping it (e.g. in a `Mutex`), since machine
//! construction is a multi-step sequence that must not interleave.

mod naming;
mod query;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::entities::{
    Container, ContainerStack, Definition, ExtruderStack, GlobalStack, Metadata,
};
use crate::domain::value_objects::{ContainerType, Slot};
use crate::error::{StackError, StackResult};

pub use naming::NameScope;
pub use query::{ContainerQuery, MetadataEntry};

/// What kind of entity a registry entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Definition,
    Container,
    GlobalStack,
    ExtruderStack,
}

impl EntryKind {
    pub fn is_stack(&self) -> bool {
        matches!(self, EntryKind::GlobalStack | EntryKind::ExtruderStack)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEntry {
    Definition(Definition),
    Container(Container),
    GlobalStack(GlobalStack),
    ExtruderStack(ExtruderStack),
}

impl RegistryEntry {
    pub fn id(&self) -> &str {
        match self {
            RegistryEntry::Definition(d) => d.id(),
            RegistryEntry::Container(c) => c.id(),
            RegistryEntry::GlobalStack(g) => g.id(),
            RegistryEntry::ExtruderStack(e) => e.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RegistryEntry::Definition(d) => d.name(),
            RegistryEntry::Container(c) => c.name(),
            RegistryEntry::GlobalStack(g) => g.stack().name(),
            RegistryEntry::ExtruderStack(e) => e.stack().name(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            RegistryEntry::Definition(d) => d.metadata(),
            RegistryEntry::Container(c) => c.metadata(),
            RegistryEntry::GlobalStack(g) => g.stack().metadata(),
            RegistryEntry::ExtruderStack(e) => e.stack().metadata(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            RegistryEntry::Definition(_) => EntryKind::Definition,
            RegistryEntry::Container(_) => EntryKind::Container,
            RegistryEntry::GlobalStack(_) => EntryKind::GlobalStack,
            RegistryEntry::ExtruderStack(_) => EntryKind::ExtruderStack,
        }
    }

    /// Metadata lookup where definitions implicitly carry `type = definition`.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        match self.metadata().get(key) {
            Some(value) => Some(value.as_str()),
            None if key == "type" && self.kind() == EntryKind::Definition => {
                Some(ContainerType::Definition.as_str())
            }
            None => None,
        }
    }

    fn stack(&self) -> Option<&ContainerStack> {
        match self {
            RegistryEntry::GlobalStack(g) => Some(g.stack()),
            RegistryEntry::ExtruderStack(e) => Some(e.stack()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContainerRegistry {
    entries: BTreeMap<String, RegistryEntry>,
    fallback_name: String,
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRegistry {
    /// An empty registry seeded with one typed empty container per override slot.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        for slot in Slot::OVERRIDES {
            if let Some(id) = slot.empty_container_id() {
                let sentinel = Container::new(id).with_type(slot.expected_type());
                entries.insert(id.to_string(), RegistryEntry::Container(sentinel));
            }
        }
        Self {
            entries,
            fallback_name: "Profile".to_string(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new().with_fallback_name(config.naming.fallback_name.clone())
    }

    pub fn with_fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = name.into();
        self
    }

    pub fn add_definition(&mut self, definition: Definition) -> StackResult<()> {
        self.insert(RegistryEntry::Definition(definition))
    }

    pub fn add_container(&mut self, container: Container) -> StackResult<()> {
        self.insert(RegistryEntry::Container(container))
    }

    pub fn add_extruder_stack(&mut self, extruder: ExtruderStack) -> StackResult<()> {
        self.insert(RegistryEntry::ExtruderStack(extruder))
    }

    /// Register a global stack whose extruders are already registered and linked to it.
    pub fn add_global_stack(&mut self, global: GlobalStack) -> StackResult<()> {
        if self.contains(global.id()) {
            return Err(StackError::DuplicateId {
                id: global.id().to_string(),
            });
        }
        if global.extruder_count() == 0 {
            return Err(StackError::MissingExtruders {
                stack: global.id().to_string(),
            });
        }
        for extruder_id in global.extruders().values() {
            match self.extruder_stack(extruder_id) {
                Some(extruder) if extruder.next_stack() == Some(global.id()) => {}
                _ => {
                    return Err(StackError::UnknownStack {
                        id: extruder_id.clone(),
                    })
                }
            }
        }
        self.insert(RegistryEntry::GlobalStack(global))
    }

    fn insert(&mut self, entry: RegistryEntry) -> StackResult<()> {
        let id = entry.id().to_string();
        if self.entries.contains_key(&id) {
            return Err(StackError::DuplicateId { id });
        }
        debug!(id = %id, kind = ?entry.kind(), "registered");
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Remove an entity and everything it owns.
    ///
    /// A global stack takes its extruder stacks with it; any stack takes its own
    /// user-changes and definition-changes containers. Empty sentinels are never
    /// removed. Returns every removed entry.
    pub fn remove(&mut self, id: &str) -> Vec<RegistryEntry> {
        if is_sentinel(id) {
            return Vec::new();
        }
        let Some(entry) = self.entries.remove(id) else {
            return Vec::new();
        };
        debug!(id = %id, kind = ?entry.kind(), "removed");

        let mut removed = Vec::new();
        if let RegistryEntry::GlobalStack(global) = &entry {
            for extruder_id in global.extruders().values() {
                removed.extend(self.remove(extruder_id));
            }
        }
        if let RegistryEntry::ExtruderStack(extruder) = &entry {
            if let Some(parent) = extruder.next_stack().map(str::to_string) {
                if let Some(global) = self.global_stack_mut(&parent) {
                    if global.extruder_id(extruder.position()) == Some(extruder.id()) {
                        global.detach_extruder(extruder.position());
                    }
                }
            }
        }
        if let Some(stack) = entry.stack() {
            for slot in [Slot::UserChanges, Slot::DefinitionChanges] {
                if stack.is_slot_empty(slot) {
                    continue;
                }
                let owned = stack.slot(slot).to_string();
                let owned_type = self.container(&owned).and_then(Container::container_type);
                if owned_type == Some(slot.expected_type()) {
                    removed.extend(self.remove(&owned));
                }
            }
        }
        removed.insert(0, entry);
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn definition(&self, id: &str) -> Option<&Definition> {
        match self.entries.get(id) {
            Some(RegistryEntry::Definition(d)) => Some(d),
            _ => None,
        }
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        match self.entries.get(id) {
            Some(RegistryEntry::Container(c)) => Some(c),
            _ => None,
        }
    }

    /// Mutable access for the owning subsystem; sentinels stay read-only.
    pub fn container_mut(&mut self, id: &str) -> Option<&mut Container> {
        if is_sentinel(id) {
            return None;
        }
        match self.entries.get_mut(id) {
            Some(RegistryEntry::Container(c)) => Some(c),
            _ => None,
        }
    }

    pub fn global_stack(&self, id: &str) -> Option<&GlobalStack> {
        match self.entries.get(id) {
            Some(RegistryEntry::GlobalStack(g)) => Some(g),
            _ => None,
        }
    }

    pub fn global_stack_mut(&mut self, id: &str) -> Option<&mut GlobalStack> {
        match self.entries.get_mut(id) {
            Some(RegistryEntry::GlobalStack(g)) => Some(g),
            _ => None,
        }
    }

    pub fn extruder_stack(&self, id: &str) -> Option<&ExtruderStack> {
        match self.entries.get(id) {
            Some(RegistryEntry::ExtruderStack(e)) => Some(e),
            _ => None,
        }
    }

    pub fn extruder_stack_mut(&mut self, id: &str) -> Option<&mut ExtruderStack> {
        match self.entries.get_mut(id) {
            Some(RegistryEntry::ExtruderStack(e)) => Some(e),
            _ => None,
        }
    }

    /// The sentinel standing in for "no override" in `slot`.
    pub fn empty_container(&self, slot: Slot) -> StackResult<&Container> {
        let id = slot
            .empty_container_id()
            .ok_or_else(|| StackError::UnknownContainer {
                id: format!("empty {}", slot),
            })?;
        self.container(id)
            .ok_or_else(|| StackError::UnknownContainer { id: id.to_string() })
    }

    /// Definitions matching `query`, in id order. Empty when nothing matches.
    pub fn find_definition_containers(&self, query: &ContainerQuery) -> Vec<&Definition> {
        self.entries
            .values()
            .filter(|entry| query.matches(entry))
            .filter_map(|entry| match entry {
                RegistryEntry::Definition(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// Metadata of every entity matching `query`, in id order. Empty when nothing matches.
    pub fn find_containers_metadata(&self, query: &ContainerQuery) -> Vec<MetadataEntry<'_>> {
        self.entries
            .values()
            .filter(|entry| query.matches(entry))
            .map(MetadataEntry::from_entry)
            .collect()
    }
}

fn is_sentinel(id: &str) -> bool {
    Slot::OVERRIDES
        .iter()
        .any(|slot| slot.empty_container_id() == Some(id))
}
