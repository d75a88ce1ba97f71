//! Registry queries
//!
//! Lookup by id, display name, and metadata equality.

use crate::domain::entities::Metadata;

use super::{EntryKind, RegistryEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerQuery {
    id: Option<String>,
    name: Option<String>,
    metadata: Vec<(String, String)>,
    kinds: Option<Vec<EntryKind>>,
    ignore_case: bool,
}

impl ContainerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    pub fn kinds(mut self, kinds: &[EntryKind]) -> Self {
        self.kinds = Some(kinds.to_vec());
        self
    }

    /// Compare id, name, and metadata values case-insensitively.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn matches(&self, entry: &RegistryEntry) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&entry.kind()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if !self.text_eq(entry.id(), id) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !self.text_eq(entry.name(), name) {
                return false;
            }
        }
        self.metadata.iter().all(|(key, expected)| {
            entry
                .metadata_value(key)
                .is_some_and(|actual| self.text_eq(actual, expected))
        })
    }

    fn text_eq(&self, a: &str, b: &str) -> bool {
        if self.ignore_case {
            a.to_lowercase() == b.to_lowercase()
        } else {
            a == b
        }
    }
}

/// A read-only view of one matching entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub kind: EntryKind,
    pub metadata: &'a Metadata,
}

impl<'a> MetadataEntry<'a> {
    pub(super) fn from_entry(entry: &'a RegistryEntry) -> Self {
        Self {
            id: entry.id(),
            name: entry.name(),
            kind: entry.kind(),
            metadata: entry.metadata(),
        }
    }
}
