//! In-memory catalogs
//!
//! Table-backed implementations of the variant, material, and quality ports for
//! hosts without a richer catalog service. Entries point at containers the host
//! registers in the `ContainerRegistry` itself.

use std::collections::{BTreeMap, HashMap};

use crate::domain::entities::GlobalStack;
use crate::domain::ports::{
    approximate_diameter, MaterialLookup, MaterialNode, QualityGroup, QualityLookup,
    VariantLookup, VariantNode,
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryVariantCatalog {
    nodes: HashMap<(String, String), VariantNode>,
}

impl InMemoryVariantCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(
        mut self,
        definition_id: impl Into<String>,
        variant_name: impl Into<String>,
        container_id: impl Into<String>,
    ) -> Self {
        let variant_name = variant_name.into();
        self.nodes.insert(
            (definition_id.into(), variant_name.clone()),
            VariantNode {
                name: variant_name,
                container_id: container_id.into(),
            },
        );
        self
    }
}

impl VariantLookup for InMemoryVariantCatalog {
    fn variant_node(&self, definition_id: &str, variant_name: &str) -> Option<VariantNode> {
        self.nodes
            .get(&(definition_id.to_string(), variant_name.to_string()))
            .cloned()
    }
}

/// Key for one material node: definition, variant (empty when none), rounded diameter, root.
type MaterialKey = (String, String, String, String);

#[derive(Debug, Clone, Default)]
pub struct InMemoryMaterialCatalog {
    diameter_roots: HashMap<(String, String), String>,
    nodes: HashMap<MaterialKey, MaterialNode>,
}

impl InMemoryMaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `diameter_root_id` as the sibling of `root_material_id` at `approximate_diameter`.
    pub fn with_diameter_root(
        mut self,
        root_material_id: impl Into<String>,
        approximate_diameter: impl Into<String>,
        diameter_root_id: impl Into<String>,
    ) -> Self {
        self.diameter_roots.insert(
            (root_material_id.into(), approximate_diameter.into()),
            diameter_root_id.into(),
        );
        self
    }

    pub fn with_material(
        mut self,
        definition_id: impl Into<String>,
        variant_name: Option<&str>,
        diameter: f64,
        root_material_id: impl Into<String>,
        container_id: impl Into<String>,
    ) -> Self {
        let root_material_id = root_material_id.into();
        self.nodes.insert(
            (
                definition_id.into(),
                variant_name.unwrap_or_default().to_string(),
                approximate_diameter(diameter),
                root_material_id.clone(),
            ),
            MaterialNode {
                root_material_id,
                container_id: container_id.into(),
            },
        );
        self
    }
}

impl MaterialLookup for InMemoryMaterialCatalog {
    fn root_material_id_for_diameter(
        &self,
        root_material_id: &str,
        approximate_diameter: &str,
    ) -> String {
        self.diameter_roots
            .get(&(
                root_material_id.to_string(),
                approximate_diameter.to_string(),
            ))
            .cloned()
            .unwrap_or_else(|| root_material_id.to_string())
    }

    fn material_node(
        &self,
        definition_id: &str,
        variant_name: Option<&str>,
        diameter: f64,
        root_material_id: &str,
    ) -> Option<MaterialNode> {
        let key = (
            definition_id.to_string(),
            variant_name.unwrap_or_default().to_string(),
            approximate_diameter(diameter),
            root_material_id.to_string(),
        );
        self.nodes.get(&key).cloned()
    }
}

/// Quality groups per machine definition.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQualityCatalog {
    groups: HashMap<String, BTreeMap<String, QualityGroup>>,
}

impl InMemoryQualityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, definition_id: impl Into<String>, group: QualityGroup) -> Self {
        self.groups
            .entry(definition_id.into())
            .or_default()
            .insert(group.quality_type.clone(), group);
        self
    }
}

impl QualityLookup for InMemoryQualityCatalog {
    fn quality_groups(&self, global: &GlobalStack) -> BTreeMap<String, QualityGroup> {
        self.groups
            .get(global.stack().definition_id())
            .cloned()
            .unwrap_or_default()
    }
}
