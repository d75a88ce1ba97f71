//! Slot value object - the fixed, named layers of a stack
//!
//! Canonical order, highest priority first:
//! `user_changes` → `quality_changes` → `quality` → `material` → `variant`
//! → `definition_changes` → `definition`.

use super::ContainerType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    UserChanges,
    QualityChanges,
    Quality,
    Material,
    Variant,
    DefinitionChanges,
    Definition,
}

impl Slot {
    /// All slots, highest priority first.
    pub const ALL: [Slot; 7] = [
        Slot::UserChanges,
        Slot::QualityChanges,
        Slot::Quality,
        Slot::Material,
        Slot::Variant,
        Slot::DefinitionChanges,
        Slot::Definition,
    ];

    /// The override slots scanned before the bottom definition.
    pub const OVERRIDES: [Slot; 6] = [
        Slot::UserChanges,
        Slot::QualityChanges,
        Slot::Quality,
        Slot::Material,
        Slot::Variant,
        Slot::DefinitionChanges,
    ];

    /// The `type` metadata a container must declare to sit in this slot.
    pub fn expected_type(&self) -> ContainerType {
        match self {
            Slot::UserChanges => ContainerType::User,
            Slot::QualityChanges => ContainerType::QualityChanges,
            Slot::Quality => ContainerType::Quality,
            Slot::Material => ContainerType::Material,
            Slot::Variant => ContainerType::Variant,
            Slot::DefinitionChanges => ContainerType::DefinitionChanges,
            Slot::Definition => ContainerType::Definition,
        }
    }

    /// Id of the registry-seeded sentinel standing in for "no override here".
    ///
    /// The definition slot has none: it is never empty.
    pub fn empty_container_id(&self) -> Option<&'static str> {
        match self {
            Slot::UserChanges => Some("empty_user_changes"),
            Slot::QualityChanges => Some("empty_quality_changes"),
            Slot::Quality => Some("empty_quality"),
            Slot::Material => Some("empty_material"),
            Slot::Variant => Some("empty_variant"),
            Slot::DefinitionChanges => Some("empty_definition_changes"),
            Slot::Definition => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::UserChanges => "user_changes",
            Slot::QualityChanges => "quality_changes",
            Slot::Quality => "quality",
            Slot::Material => "material",
            Slot::Variant => "variant",
            Slot::DefinitionChanges => "definition_changes",
            Slot::Definition => "definition",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
