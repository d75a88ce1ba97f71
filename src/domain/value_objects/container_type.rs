//! Container type value object - the `type` metadata tag of a container

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declared role of a container, stored under the `type` metadata key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerType {
    User,
    QualityChanges,
    Quality,
    Material,
    Variant,
    DefinitionChanges,
    Definition,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::User => "user",
            ContainerType::QualityChanges => "quality_changes",
            ContainerType::Quality => "quality",
            ContainerType::Material => "material",
            ContainerType::Variant => "variant",
            ContainerType::DefinitionChanges => "definition_changes",
            ContainerType::Definition => "definition",
        }
    }
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ContainerType::User),
            "quality_changes" => Ok(ContainerType::QualityChanges),
            "quality" => Ok(ContainerType::Quality),
            "material" => Ok(ContainerType::Material),
            "variant" => Ok(ContainerType::Variant),
            "definition_changes" => Ok(ContainerType::DefinitionChanges),
            "definition" => Ok(ContainerType::Definition),
            other => Err(format!("unknown container type '{}'", other)),
        }
    }
}

/// Lenient boolean parsing for string metadata flags like `has_variants`.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "on"
    )
}
