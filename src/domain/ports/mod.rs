//! Domain Ports (Interfaces)
//!
//! The catalog services the builder consults to pick variant, material, and
//! quality containers. Hosts provide the real catalogs; `infrastructure::catalog`
//! has in-memory implementations.

pub mod material_lookup;
pub mod quality_lookup;
pub mod variant_lookup;

pub use material_lookup::{approximate_diameter, MaterialLookup, MaterialNode};
pub use quality_lookup::{QualityGroup, QualityLookup};
pub use variant_lookup::{VariantLookup, VariantNode};
