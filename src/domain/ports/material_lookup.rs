//! MaterialLookup port

/// A concrete material for one (definition, variant, diameter) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialNode {
    pub root_material_id: String,
    pub container_id: String,
}

pub trait MaterialLookup: Send + Sync {
    /// Map a root material to its sibling for `approximate_diameter` (e.g. `"3"`).
    ///
    /// Returns `root_material_id` unchanged when there is no diameter-specific sibling.
    fn root_material_id_for_diameter(
        &self,
        root_material_id: &str,
        approximate_diameter: &str,
    ) -> String;

    fn material_node(
        &self,
        definition_id: &str,
        variant_name: Option<&str>,
        diameter: f64,
        root_material_id: &str,
    ) -> Option<MaterialNode>;
}

/// Diameter rounded to the nearest whole unit, the granularity catalogs key materials by.
pub fn approximate_diameter(diameter: f64) -> String {
    format!("{}", diameter.round() as i64)
}
