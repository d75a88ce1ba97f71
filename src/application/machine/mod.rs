//! Machine Module
//!
//! Builds machines: one global stack and one extruder stack per extruder train,
//! each wired with fresh user-changes and definition-changes containers.
//!
//! ## Structure
//!
//! - `builder` - Core use case logic (`StackBuilder`)
//! - `journal` - Tracks what a build registered so a failed build can be undone
//!
//! ## Usage
//!
//! ```ignore
//! use printstack::application::StackBuilder;
//!
//! let builder = StackBuilder::new(variants, materials, qualities);
//! let machine = builder.create_machine(&mut registry, "My Printer", "ultimaker3")?;
//! ```

mod builder;
mod journal;

pub use builder::StackBuilder;
