//! Property tests for stack resolution order.

use proptest::prelude::*;

use printstack::{
    Container, ContainerRegistry, Definition, GlobalStack, SettingResolver, Slot,
};
use serde_json::json;

const KEY: &str = "speed_print";

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the value comes from the first slot, in priority order, that defines the key.
    #[test]
    fn property_highest_priority_layer_wins(
        defines in proptest::collection::vec(any::<bool>(), 6),
        definition_defines in any::<bool>(),
    ) {
        let mut registry = ContainerRegistry::new();
        let mut definition = Definition::new("machine");
        if definition_defines {
            definition = definition.with_default(KEY, json!("definition"));
        }
        registry.add_definition(definition.clone()).unwrap();

        let mut global = GlobalStack::new("g", &definition);
        for (slot, defines_key) in Slot::OVERRIDES.into_iter().zip(&defines) {
            let mut container =
                Container::new(format!("layer_{slot}")).with_type(slot.expected_type());
            if *defines_key {
                container.set_value(KEY, json!(slot.as_str()));
            }
            global.stack_mut().set_slot(slot, &container).unwrap();
            registry.add_container(container).unwrap();
        }

        let expected = Slot::OVERRIDES
            .into_iter()
            .zip(&defines)
            .find(|(_, d)| **d)
            .map(|(slot, _)| slot)
            .or(definition_defines.then_some(Slot::Definition));

        let resolved = SettingResolver::new(&registry)
            .resolve_stack(global.stack(), KEY)
            .unwrap();

        match expected {
            Some(slot) => {
                let resolved = resolved.expect("a layer defines the key");
                prop_assert_eq!(resolved.slot, slot);
                if slot != Slot::Definition {
                    prop_assert_eq!(resolved.value, json!(slot.as_str()));
                }
            }
            None => prop_assert!(resolved.is_none()),
        }
    }

    /// PROPERTY: a cleared slot is skipped even though the container it held still defines the key.
    #[test]
    fn property_cleared_slots_fall_through(
        cleared in proptest::collection::vec(any::<bool>(), 6),
    ) {
        let mut registry = ContainerRegistry::new();
        let definition = Definition::new("machine").with_default(KEY, json!("definition"));
        registry.add_definition(definition.clone()).unwrap();

        let mut global = GlobalStack::new("g", &definition);
        for (slot, clear) in Slot::OVERRIDES.into_iter().zip(&cleared) {
            let container = Container::new(format!("layer_{slot}"))
                .with_type(slot.expected_type())
                .with_setting(KEY, json!(slot.as_str()));
            global.stack_mut().set_slot(slot, &container).unwrap();
            registry.add_container(container).unwrap();
            if *clear {
                global.stack_mut().clear_slot(slot);
            }
        }

        let resolved = SettingResolver::new(&registry)
            .resolve_stack(global.stack(), KEY)
            .unwrap()
            .expect("definition supplies a default");

        let expected = Slot::OVERRIDES
            .into_iter()
            .zip(&cleared)
            .find(|(_, c)| !**c)
            .map(|(slot, _)| slot)
            .unwrap_or(Slot::Definition);
        prop_assert_eq!(resolved.slot, expected);
    }
}
