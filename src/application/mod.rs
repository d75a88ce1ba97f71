//! Application Layer
//!
//! Use cases that orchestrate the domain against the registry.
//!
//! ## Use Cases
//!
//! - `StackBuilder` - Creates a fully-populated machine (global stack plus extruders)
//!   from a definition id and publishes it to the registry

pub mod machine;

pub use machine::StackBuilder;
