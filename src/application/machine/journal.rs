//! Registration journal
//!
//! Every registry insertion made while building one machine goes through the
//! journal, so a build that fails partway can remove exactly what it added.
//! Ids handed out before their entity is registered are reserved here too.

use tracing::warn;

use crate::domain::entities::{Container, ExtruderStack, GlobalStack};
use crate::error::StackResult;
use crate::registry::ContainerRegistry;

#[derive(Debug, Default)]
pub(crate) struct RegistrationJournal {
    ids: Vec<String>,
    reserved: Vec<String>,
}

impl RegistrationJournal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Hold `id` for an entity that will be registered later in this build.
    pub(crate) fn reserve(&mut self, id: impl Into<String>) {
        self.reserved.push(id.into());
    }

    /// An id free in `registry` and not reserved by this build.
    pub(crate) fn unique_name(&self, registry: &ContainerRegistry, candidate: &str) -> String {
        registry.unique_name_reserving(candidate, &self.reserved)
    }

    pub(crate) fn add_container(
        &mut self,
        registry: &mut ContainerRegistry,
        container: Container,
    ) -> StackResult<()> {
        let id = container.id().to_string();
        registry.add_container(container)?;
        self.ids.push(id);
        Ok(())
    }

    pub(crate) fn add_extruder_stack(
        &mut self,
        registry: &mut ContainerRegistry,
        extruder: ExtruderStack,
    ) -> StackResult<()> {
        let id = extruder.id().to_string();
        registry.add_extruder_stack(extruder)?;
        self.ids.push(id);
        Ok(())
    }

    pub(crate) fn add_global_stack(
        &mut self,
        registry: &mut ContainerRegistry,
        global: GlobalStack,
    ) -> StackResult<()> {
        let id = global.id().to_string();
        registry.add_global_stack(global)?;
        self.ids.push(id);
        Ok(())
    }

    pub(crate) fn registered_ids(&self) -> &[String] {
        &self.ids
    }

    /// Remove everything recorded, newest first. Returns the removed ids.
    pub(crate) fn rollback(self, registry: &mut ContainerRegistry) -> Vec<String> {
        let mut removed = Vec::new();
        for id in self.ids.iter().rev() {
            removed.extend(registry.remove(id).iter().map(|e| e.id().to_string()));
        }
        if !removed.is_empty() {
            warn!(removed = ?removed, "rolled back partially built machine");
        }
        removed
    }
}
