//! QualityLookup port

use std::collections::BTreeMap;

use crate::domain::entities::GlobalStack;
use crate::domain::value_objects::ExtruderPosition;

/// One quality type: a container for the global stack plus one per extruder position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityGroup {
    pub name: String,
    pub quality_type: String,
    pub global_container_id: String,
    pub extruder_container_ids: BTreeMap<ExtruderPosition, String>,
}

impl QualityGroup {
    pub fn new(
        name: impl Into<String>,
        quality_type: impl Into<String>,
        global_container_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quality_type: quality_type.into(),
            global_container_id: global_container_id.into(),
            extruder_container_ids: BTreeMap::new(),
        }
    }

    pub fn with_extruder(
        mut self,
        position: ExtruderPosition,
        container_id: impl Into<String>,
    ) -> Self {
        self.extruder_container_ids
            .insert(position, container_id.into());
        self
    }

    pub fn extruder_container_id(&self, position: ExtruderPosition) -> Option<&str> {
        self.extruder_container_ids
            .get(&position)
            .map(String::as_str)
    }
}

pub trait QualityLookup: Send + Sync {
    /// Quality groups usable by `global`, keyed by quality type.
    fn quality_groups(&self, global: &GlobalStack) -> BTreeMap<String, QualityGroup>;
}
