//! Global stack entity
//!
//! One machine. Owns its extruder stacks by position; the registry holds the
//! extruder stacks themselves and the global stack keeps their ids.

use std::collections::BTreeMap;

use crate::domain::value_objects::ExtruderPosition;
use crate::error::{StackError, StackResult};

use super::{ContainerStack, Definition, ExtruderStack};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalStack {
    stack: ContainerStack,
    extruders: BTreeMap<ExtruderPosition, String>,
}

impl GlobalStack {
    pub fn new(id: impl Into<String>, definition: &Definition) -> Self {
        Self {
            stack: ContainerStack::new(id, definition),
            extruders: BTreeMap::new(),
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

    /// Attach `extruder` under its declared position and link it back to this stack.
    ///
    /// An occupied position is rejected and the extruder already there is kept.
    pub fn add_extruder(&mut self, extruder: &mut ExtruderStack) -> StackResult<()> {
        let position = extruder.position();
        if self.extruders.contains_key(&position) {
            return Err(StackError::DuplicatePosition {
                position,
                stack: self.id().to_string(),
            });
        }
        extruder.set_next_stack(self);
        self.extruders.insert(position, extruder.id().to_string());
        Ok(())
    }

    /// Extruder stack ids by position, in position order.
    pub fn extruders(&self) -> &BTreeMap<ExtruderPosition, String> {
        &self.extruders
    }

    pub fn extruder_id(&self, position: ExtruderPosition) -> Option<&str> {
        self.extruders.get(&position).map(String::as_str)
    }

    pub fn extruder_count(&self) -> usize {
        self.extruders.len()
    }

    pub(crate) fn detach_extruder(&mut self, position: ExtruderPosition) -> Option<String> {
        self.extruders.remove(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> GlobalStack {
        GlobalStack::new("My Printer", &Definition::new("um3"))
    }

    fn extruder(id: &str, position: u32) -> ExtruderStack {
        ExtruderStack::new(
            id,
            &Definition::new("um3_extruder"),
            ExtruderPosition::new(position),
        )
    }

    #[test]
    fn add_extruder_links_back_reference() {
        let mut global = machine();
        let mut left = extruder("left", 0);

        global.add_extruder(&mut left).unwrap();

        assert_eq!(left.next_stack(), Some("My Printer"));
        assert_eq!(global.extruder_count(), 1);
        assert_eq!(global.extruder_id(ExtruderPosition::new(0)), Some("left"));
    }

    #[test]
    fn add_extruder_rejects_duplicate_position() {
        let mut global = machine();
        let mut left = extruder("left", 0);
        let mut impostor = extruder("impostor", 0);
        global.add_extruder(&mut left).unwrap();

        let err = global.add_extruder(&mut impostor).unwrap_err();

        assert_eq!(
            err,
            StackError::DuplicatePosition {
                position: ExtruderPosition::new(0),
                stack: "My Printer".to_string(),
            }
        );
        assert_eq!(global.extruder_id(ExtruderPosition::new(0)), Some("left"));
        assert_eq!(impostor.next_stack(), None);
    }

    #[test]
    fn extruders_iterate_in_position_order() {
        let mut global = machine();
        for (id, position) in [("third", 10), ("first", 0), ("second", 2)] {
            global.add_extruder(&mut extruder(id, position)).unwrap();
        }

        let ids: Vec<&str> = global.extruders().values().map(String::as_str).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
