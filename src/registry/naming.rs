//! Unique naming
//!
//! New machines and their helper containers get ids that collide with nothing
//! already registered. A trailing `" #N"` is treated as a previous
//! disambiguation and renumbered rather than stacked.

use super::{ContainerRegistry, EntryKind};

/// Which entities `create_unique_name` checks for collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameScope {
    /// Global and extruder stacks.
    Machine,
    /// Non-stack, non-definition containers.
    Container,
}

impl NameScope {
    fn includes(&self, kind: EntryKind) -> bool {
        match self {
            NameScope::Machine => kind.is_stack(),
            NameScope::Container => kind == EntryKind::Container,
        }
    }
}

impl ContainerRegistry {
    /// `candidate` if nothing uses it, else `"candidate #2"`, `"candidate #3"`, ...
    ///
    /// Ids match exactly; display names match case-insensitively. A blank
    /// candidate becomes the configured fallback name.
    pub fn unique_name(&self, candidate: &str) -> String {
        self.unique_name_reserving(candidate, &[])
    }

    /// `unique_name`, also treating `reserved` as taken.
    ///
    /// For ids a caller has handed out but not registered yet. Reserved ids
    /// match case-insensitively, like display names.
    pub fn unique_name_reserving(&self, candidate: &str, reserved: &[String]) -> String {
        let cleaned = candidate.replace('*', "");
        let mut base = strip_number_suffix(&cleaned).to_string();
        if base.is_empty() {
            base = self.fallback_name.clone();
        }

        let mut unique = base.clone();
        let mut i = 1;
        while self.name_in_use(&unique) || is_reserved(reserved, &unique) {
            i += 1;
            unique = format!("{} #{}", base, i);
        }
        unique
    }

    /// Allocate a name when creating or renaming an entity in `scope`.
    ///
    /// A blank `new_name` falls back to `fallback_name`. `current_name` is always
    /// acceptable, so renaming something to its own name leaves it unchanged.
    pub fn create_unique_name(
        &self,
        scope: NameScope,
        current_name: &str,
        new_name: &str,
        fallback_name: &str,
    ) -> String {
        let mut base = strip_number_suffix(new_name).to_string();
        if base.is_empty() {
            base = fallback_name.trim().to_string();
        }

        let mut unique = base.clone();
        let mut i = 1;
        while unique != current_name && self.exists_in_scope(scope, &unique) {
            i += 1;
            unique = format!("{} #{}", base, i);
        }
        unique
    }

    fn name_in_use(&self, name: &str) -> bool {
        let folded = name.to_lowercase();
        self.entries
            .values()
            .any(|entry| entry.id() == name || entry.name().to_lowercase() == folded)
    }

    fn exists_in_scope(&self, scope: NameScope, name: &str) -> bool {
        let folded = name.to_lowercase();
        self.entries
            .values()
            .filter(|entry| scope.includes(entry.kind()))
            .any(|entry| entry.id().to_lowercase() == folded || entry.name() == name)
    }
}

fn is_reserved(reserved: &[String], name: &str) -> bool {
    let folded = name.to_lowercase();
    reserved.iter().any(|r| r.to_lowercase() == folded)
}

/// `"foo #3"` → `"foo"`; anything else is only trimmed.
pub(crate) fn strip_number_suffix(name: &str) -> &str {
    let trimmed = name.trim();
    if let Some(idx) = trimmed.rfind('#') {
        let digits = &trimmed[idx + 1..];
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return trimmed[..idx].trim_end();
        }
    }
    trimmed
}
