//! Domain Entities
//!
//! Entities with identity that live in the `ContainerRegistry`:
//! - `Container` - a key/value override layer with metadata
//! - `Definition` - the read-only schema at the bottom of every stack
//! - `ContainerStack` - the fixed set of named slots shared by both stack kinds
//! - `GlobalStack` / `ExtruderStack` - one machine and its toolheads

mod container;
mod definition;
mod extruder_stack;
mod global_stack;
mod stack;

pub use container::{Container, Metadata, SettingValue};
pub use definition::Definition;
pub use extruder_stack::ExtruderStack;
pub use global_stack::GlobalStack;
pub use stack::ContainerStack;
