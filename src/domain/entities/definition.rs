//! Definition entity
//!
//! The static schema of a machine or extruder: declared setting defaults,
//! machine-level metadata flags, and the extruder trains a machine has.

use std::collections::BTreeMap;

use crate::domain::value_objects::parse_bool;

use super::{Metadata, SettingValue};

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    id: String,
    name: String,
    metadata: Metadata,
    defaults: BTreeMap<String, SettingValue>,
    inherits: Option<String>,
    /// `machine_extruder_trains`: extruder position → extruder definition id.
    extruder_trains: BTreeMap<String, String>,
}

impl Definition {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            metadata: Metadata::new(),
            defaults: BTreeMap::new(),
            inherits: None,
            extruder_trains: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_inherits(mut self, parent_id: impl Into<String>) -> Self {
        self.inherits = Some(parent_id.into());
        self
    }

    pub fn with_extruder_train(
        mut self,
        position: impl Into<String>,
        extruder_definition_id: impl Into<String>,
    ) -> Self {
        self.extruder_trains
            .insert(position.into(), extruder_definition_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_entry(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn inherits(&self) -> Option<&str> {
        self.inherits.as_deref()
    }

    /// Default declared by this definition itself; parents are not consulted.
    pub fn local_default(&self, key: &str) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    pub fn has_variants(&self) -> bool {
        self.flag("has_variants")
    }

    pub fn has_materials(&self) -> bool {
        self.flag("has_materials")
    }

    pub fn preferred_variant_name(&self) -> Option<&str> {
        self.non_blank("preferred_variant_name")
    }

    pub fn preferred_material(&self) -> Option<&str> {
        self.non_blank("preferred_material")
    }

    pub fn preferred_quality_type(&self) -> Option<&str> {
        self.non_blank("preferred_quality_type")
    }

    /// The `position` an extruder definition declares for itself.
    pub fn position(&self) -> Option<&str> {
        self.metadata_entry("position")
    }

    pub fn extruder_trains(&self) -> &BTreeMap<String, String> {
        &self.extruder_trains
    }

    fn flag(&self, key: &str) -> bool {
        self.metadata_entry(key).map(parse_bool).unwrap_or(false)
    }

    fn non_blank(&self, key: &str) -> Option<&str> {
        self.metadata_entry(key).filter(|v| !v.trim().is_empty())
    }
}
