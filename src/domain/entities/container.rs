//! Container entity
//!
//! An opaque settings layer: a metadata map plus locally-defined setting values,
//! optionally pointing at the definition its keys are declared in.

use std::collections::BTreeMap;

use crate::domain::value_objects::ContainerType;

/// String metadata attached to containers, definitions, and stacks.
pub type Metadata = BTreeMap<String, String>;

/// A single resolved setting value.
pub type SettingValue = serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    id: String,
    name: String,
    metadata: Metadata,
    settings: BTreeMap<String, SettingValue>,
    definition: Option<String>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            metadata: Metadata::new(),
            settings: BTreeMap::new(),
            definition: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_type(self, container_type: ContainerType) -> Self {
        self.with_metadata("type", container_type.as_str())
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn with_definition(mut self, definition_id: impl Into<String>) -> Self {
        self.definition = Some(definition_id.into());
        self
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

    /// Raw `type` metadata, as declared.
    pub fn declared_type(&self) -> Option<&str> {
        self.metadata_entry("type")
    }

    pub fn container_type(&self) -> Option<ContainerType> {
        self.declared_type().and_then(|t| t.parse().ok())
    }

    pub fn definition_id(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    /// Value defined in this container itself, never through its definition.
    pub fn local_value(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }

    pub fn has_local(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.settings.insert(key.into(), value.into());
    }

    pub fn remove_value(&mut self, key: &str) -> Option<SettingValue> {
        self.settings.remove(key)
    }

    pub fn setting_keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}
