//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports.

pub mod catalog;

pub use catalog::{InMemoryMaterialCatalog, InMemoryQualityCatalog, InMemoryVariantCatalog};
