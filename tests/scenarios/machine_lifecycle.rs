//! Scenario: create, edit, rename, and remove a single-extruder machine.

use printstack::{
    ContainerRegistry, ExtruderPosition, NameScope, SettingResolver, Slot, StackError,
};
use serde_json::json;

use crate::common::{builder, registry, SIMPLE_MACHINE};

fn create(registry: &mut ContainerRegistry, name: &str) -> String {
    builder()
        .create_machine(registry, name, SIMPLE_MACHINE)
        .unwrap()
        .expect("simple machine definition is registered")
        .id()
        .to_string()
}

#[test]
fn new_machine_resolves_definition_defaults() {
    let mut registry = registry();
    let machine = create(&mut registry, "Workshop");
    let resolver = SettingResolver::new(&registry);

    let layer_height = resolver.resolve_with_source(&machine, "layer_height").unwrap();
    assert_eq!(layer_height.value, json!(0.1));
    assert_eq!(layer_height.slot, Slot::Definition);
    assert_eq!(layer_height.source_id, "fdmprinter");

    let diameter = resolver
        .resolve_with_source(&machine, "material_diameter")
        .unwrap();
    assert_eq!(diameter.value, json!(1.75));
    assert_eq!(diameter.source_id, SIMPLE_MACHINE);
}

#[test]
fn user_changes_take_priority_over_quality_and_definition() {
    let mut registry = registry();
    let machine = create(&mut registry, "Workshop");
    registry
        .container_mut("simple_normal")
        .unwrap()
        .set_value("layer_height", 0.15);

    assert_eq!(
        SettingResolver::new(&registry)
            .resolve(&machine, "layer_height")
            .unwrap(),
        json!(0.15)
    );

    let user_id = registry
        .global_stack(&machine)
        .unwrap()
        .stack()
        .slot(Slot::UserChanges)
        .to_string();
    registry
        .container_mut(&user_id)
        .unwrap()
        .set_value("layer_height", 0.3);

    let resolved = SettingResolver::new(&registry)
        .resolve_with_source(&machine, "layer_height")
        .unwrap();
    assert_eq!(resolved.value, json!(0.3));
    assert_eq!(resolved.slot, Slot::UserChanges);
    assert_eq!(resolved.source_id, user_id);
}

#[test]
fn unknown_setting_is_reported_against_the_stack() {
    let mut registry = registry();
    let machine = create(&mut registry, "Workshop");

    let err = SettingResolver::new(&registry)
        .resolve(&machine, "no_such_setting")
        .unwrap_err();

    assert_eq!(
        err,
        StackError::UndefinedSetting {
            key: "no_such_setting".to_string(),
            stack: "Workshop".to_string(),
        }
    );
}

#[test]
fn removing_a_machine_removes_everything_it_owns() {
    let mut registry = registry();
    let before = registry.len();
    let machine = create(&mut registry, "Workshop");
    let extruder_id = registry
        .global_stack(&machine)
        .unwrap()
        .extruder_id(ExtruderPosition::new(0))
        .unwrap()
        .to_string();

    let removed = registry.remove(&machine);

    assert_eq!(removed.len(), 6);
    assert_eq!(removed[0].id(), "Workshop");
    assert!(!registry.contains(&extruder_id));
    assert_eq!(registry.len(), before);
    assert!(registry.container("simple_normal").is_some());
}

#[test]
fn name_is_reusable_after_removal() {
    let mut registry = registry();
    let first = create(&mut registry, "Workshop");
    registry.remove(&first);

    assert_eq!(create(&mut registry, "Workshop"), "Workshop");
}

#[test]
fn rename_keeps_current_name_and_avoids_others() {
    let mut registry = registry();
    let workshop = create(&mut registry, "Workshop");
    create(&mut registry, "Garage");

    assert_eq!(
        registry.create_unique_name(NameScope::Machine, &workshop, "Workshop", "Simple Printer"),
        "Workshop"
    );
    assert_eq!(
        registry.create_unique_name(NameScope::Machine, &workshop, "garage", "Simple Printer"),
        "garage #2"
    );
    assert_eq!(
        registry.create_unique_name(NameScope::Machine, &workshop, "", "Simple Printer"),
        "Simple Printer"
    );
}
