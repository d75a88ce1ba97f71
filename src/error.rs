//! Error types for printstack
//!
//! Uses `thiserror` for library errors. Every failure surfaces synchronously to the
//! immediate caller; the only soft case (an unknown machine definition) is reported
//! by `StackBuilder::create_machine` as `Ok(None)` and never reaches this type.

use thiserror::Error;

use crate::domain::value_objects::{ContainerType, ExtruderPosition, Slot};

/// Result type alias for printstack operations
pub type StackResult<T> = Result<T, StackError>;

/// Main error type for stack construction and setting resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// Static definition data references something the collaborators cannot resolve
    #[error("consistency error: {message}")]
    Consistency { message: String },

    /// Registry add with an id that is already taken
    #[error("an entity with id '{id}' is already registered")]
    DuplicateId { id: String },

    /// No layer of the stack, including the bottom definition, supplies the key
    #[error("setting '{key}' is not defined anywhere in stack '{stack}'")]
    UndefinedSetting { key: String, stack: String },

    /// Extruder stack fell through to its parent but has none linked
    #[error("extruder stack '{stack}' has no next stack to fall back to")]
    NoParentStack { stack: String },

    /// Global stack already has an extruder at this position
    #[error("global stack '{stack}' already has an extruder at position {position}")]
    DuplicatePosition {
        position: ExtruderPosition,
        stack: String,
    },

    /// Container's declared type disagrees with the slot it is assigned to
    #[error("container '{container}' of type '{actual}' cannot be placed in slot '{slot}' (expects '{expected}')")]
    SlotTypeMismatch {
        slot: Slot,
        expected: ContainerType,
        actual: String,
        container: String,
    },

    /// A stack references a container id that is not registered
    #[error("container '{id}' is not registered")]
    UnknownContainer { id: String },

    /// A stack id that is not registered (or is not of the requested kind)
    #[error("stack '{id}' is not registered")]
    UnknownStack { id: String },

    /// Definition inheritance chain loops back on itself
    #[error("definition inheritance cycle detected at '{id}'")]
    CircularDefinition { id: String },

    /// Extruder position metadata that is not a small non-negative integer
    #[error("invalid extruder position '{value}'")]
    InvalidPosition { value: String },

    /// Global stack registered before any extruder was attached
    #[error("global stack '{stack}' must have at least one extruder before it is registered")]
    MissingExtruders { stack: String },
}

impl StackError {
    pub(crate) fn consistency(message: impl Into<String>) -> Self {
        StackError::Consistency {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by malformed static definition data
    pub fn is_consistency(&self) -> bool {
        matches!(self, StackError::Consistency { .. })
    }
}
