//! Domain Value Objects
//!
//! Small immutable types shared by entities, the registry, and the builder.

mod container_type;
mod extruder_position;
mod slot;

pub use container_type::{parse_bool, ContainerType};
pub use extruder_position::ExtruderPosition;
pub use slot::Slot;
