//! VariantLookup port

/// A variant known to the catalog, backed by a registered container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantNode {
    pub name: String,
    pub container_id: String,
}

pub trait VariantLookup: Send + Sync {
    fn variant_node(&self, definition_id: &str, variant_name: &str) -> Option<VariantNode>;
}
