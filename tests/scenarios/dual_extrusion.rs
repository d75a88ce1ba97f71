//! Scenario: a two-extruder machine with per-extruder variant, material, and quality.

use printstack::{
    ContainerQuery, ContainerRegistry, EntryKind, ExtruderPosition, GlobalStack, SettingResolver,
    Slot, StackError,
};
use serde_json::json;

use crate::common::{builder, registry, DUAL_MACHINE};

fn dual(registry: &mut ContainerRegistry) -> GlobalStack {
    builder()
        .create_machine(registry, "Dual", DUAL_MACHINE)
        .unwrap()
        .expect("dual machine definition is registered")
}

fn extruder_id(global: &GlobalStack, position: u32) -> String {
    global
        .extruder_id(ExtruderPosition::new(position))
        .unwrap()
        .to_string()
}

#[test]
fn extruders_get_variant_and_material_but_global_does_not() {
    let mut registry = registry();
    let global = dual(&mut registry);

    assert!(global.stack().is_slot_empty(Slot::Variant));
    assert!(global.stack().is_slot_empty(Slot::Material));
    assert_eq!(global.stack().slot(Slot::Quality), "dual_global_fast");

    for position in [0, 1] {
        let extruder = registry
            .extruder_stack(&extruder_id(&global, position))
            .unwrap();
        assert_eq!(extruder.stack().slot(Slot::Variant), "dual_nozzle_04");
        assert_eq!(extruder.stack().slot(Slot::Material), "dual_pla_04");
        assert_eq!(extruder.stack().slot(Slot::Quality), "dual_pla_04_fast");
    }
}

#[test]
fn extruder_values_are_in_position_order() {
    let mut registry = registry();
    let global = dual(&mut registry);

    let values = SettingResolver::new(&registry)
        .extruder_values(&global, "machine_nozzle_size")
        .unwrap();

    assert_eq!(
        values,
        vec![
            (ExtruderPosition::new(0), json!(0.4)),
            (ExtruderPosition::new(1), json!(0.6)),
        ]
    );
}

#[test]
fn extruder_prefers_its_own_layers() {
    let mut registry = registry();
    let global = dual(&mut registry);
    let left = extruder_id(&global, 0);

    let resolved = SettingResolver::new(&registry)
        .resolve_with_source(&left, "infill_sparse_density")
        .unwrap();

    assert_eq!(resolved.value, json!(15));
    assert_eq!(resolved.stack_id, left);
    assert_eq!(resolved.slot, Slot::Quality);
}

#[test]
fn extruder_falls_back_to_global_stack() {
    let mut registry = registry();
    let global = dual(&mut registry);
    let left = extruder_id(&global, 0);
    let resolver = SettingResolver::new(&registry);

    let layer_height = resolver.resolve_with_source(&left, "layer_height").unwrap();
    assert_eq!(layer_height.value, json!(0.2));
    assert_eq!(layer_height.stack_id, "Dual");
    assert_eq!(layer_height.source_id, "dual_global_fast");

    let adhesion = resolver.resolve_with_source(&left, "adhesion_type").unwrap();
    assert_eq!(adhesion.value, json!("brim"));
    assert_eq!(adhesion.slot, Slot::Definition);
    assert_eq!(adhesion.source_id, "fdmprinter");
}

#[test]
fn undefined_setting_names_the_extruder() {
    let mut registry = registry();
    let global = dual(&mut registry);
    let right = extruder_id(&global, 1);

    let err = SettingResolver::new(&registry)
        .resolve(&right, "no_such_setting")
        .unwrap_err();

    assert_eq!(
        err,
        StackError::UndefinedSetting {
            key: "no_such_setting".to_string(),
            stack: right,
        }
    );
}

#[test]
fn clearing_a_slot_exposes_lower_layers() {
    let mut registry = registry();
    let global = dual(&mut registry);
    let left = extruder_id(&global, 0);

    let cleared = registry
        .extruder_stack_mut(&left)
        .unwrap()
        .stack_mut()
        .clear_slot(Slot::Quality);
    assert!(cleared);

    assert_eq!(
        SettingResolver::new(&registry)
            .resolve(&left, "infill_sparse_density")
            .unwrap(),
        json!(20)
    );
}

#[test]
fn removing_an_extruder_detaches_it() {
    let mut registry = registry();
    let global = dual(&mut registry);
    let right = extruder_id(&global, 1);

    registry.remove(&right);

    let global = registry.global_stack("Dual").unwrap();
    assert_eq!(global.extruder_count(), 1);
    assert!(global.extruder_id(ExtruderPosition::new(1)).is_none());
}

#[test]
fn machine_entities_are_queryable_by_metadata() {
    let mut registry = registry();
    dual(&mut registry);

    let extruders = registry.find_containers_metadata(
        &ContainerQuery::new()
            .metadata("machine", "Dual")
            .kinds(&[EntryKind::ExtruderStack]),
    );
    assert_eq!(extruders.len(), 2);

    let user = registry.find_containers_metadata(
        &ContainerQuery::new()
            .metadata("type", "user")
            .metadata("machine", "dual")
            .ignore_case(true),
    );
    assert_eq!(user.len(), 1);
    assert_eq!(user[0].id, "Dual_user");
}
