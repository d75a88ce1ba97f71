//! Extruder stack entity
//!
//! One toolhead. Falls back to its global stack (by id, non-owning) for keys its
//! own layers do not define.

use crate::domain::value_objects::ExtruderPosition;

use super::{ContainerStack, Definition, GlobalStack};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtruderStack {
    stack: ContainerStack,
    position: ExtruderPosition,
    next_stack: Option<String>,
}

impl ExtruderStack {
    pub fn new(id: impl Into<String>, definition: &Definition, position: ExtruderPosition) -> Self {
        let mut stack = ContainerStack::new(id, definition);
        stack.set_metadata_entry("position", position.to_string());
        Self {
            stack,
            position,
            next_stack: None,
        }
    }

    pub fn id(&self) -> &str {
        self.stack.id()
    }

    pub fn stack(&self) -> &ContainerStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut ContainerStack {
        &mut self.stack
    }

    pub fn position(&self) -> ExtruderPosition {
        self.position
    }

    /// Id of the global stack this extruder falls back to.
    pub fn next_stack(&self) -> Option<&str> {
        self.next_stack.as_deref()
    }

    pub fn set_next_stack(&mut self, global: &GlobalStack) {
        self.next_stack = Some(global.id().to_string());
        self.stack.set_metadata_entry("machine", global.id());
    }
}
