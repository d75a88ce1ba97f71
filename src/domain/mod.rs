//! Domain Layer
//!
//! The core of printstack: stack entities, the resolution engine, and the
//! collaborator ports. Nothing here touches the file system.
//!
//! ## Structure
//!
//! - `entities/` - Containers, definitions, and stacks
//! - `value_objects/` - Slots, container types, extruder positions
//! - `services/` - Setting resolution
//! - `ports/` - Catalog interfaces the builder depends on

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
