//! Property tests for unique name allocation.

use proptest::prelude::*;

use printstack::{Container, ContainerRegistry, NameScope};

fn registry_with(ids: &[String]) -> ContainerRegistry {
    let mut registry = ContainerRegistry::new();
    for id in ids {
        // Duplicates in the generated set are simply skipped.
        let _ = registry.add_container(Container::new(id.clone()));
    }
    registry
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: unique_name never returns an id or (case-folded) name already in use.
    #[test]
    fn property_unique_name_is_free(
        taken in proptest::collection::vec("[A-Za-z]{1,6}( #[0-9])?", 0..12),
        candidate in "[A-Za-z]{0,6}( #[0-9])?",
    ) {
        let registry = registry_with(&taken);

        let name = registry.unique_name(&candidate);

        prop_assert!(!name.is_empty());
        prop_assert!(!registry.contains(&name));
        let folded = name.to_lowercase();
        prop_assert!(registry.entries().all(|e| e.name().to_lowercase() != folded));
    }

    /// PROPERTY: once a unique name is registered, asking again yields a different one.
    #[test]
    fn property_unique_name_advances(
        taken in proptest::collection::vec("[a-z]{1,4}", 0..8),
        candidate in "[a-z]{1,4}",
    ) {
        let mut registry = registry_with(&taken);

        let first = registry.unique_name(&candidate);
        registry.add_container(Container::new(first.clone())).unwrap();
        let second = registry.unique_name(&candidate);

        prop_assert_ne!(first, second);
    }

    /// PROPERTY: renaming to the current name never churns it.
    #[test]
    fn property_current_name_is_kept(
        taken in proptest::collection::vec("[A-Za-z]{1,6}", 0..8),
        current in "[A-Za-z]{1,6}",
    ) {
        let registry = registry_with(&taken);

        for scope in [NameScope::Machine, NameScope::Container] {
            prop_assert_eq!(
                registry.create_unique_name(scope, &current, &current, "Fallback"),
                current.clone()
            );
        }
    }
}
