//! Test fixtures - machine definitions and the catalogs that serve them.

use printstack::{
    Container, ContainerRegistry, ContainerType, Definition, ExtruderPosition,
    InMemoryMaterialCatalog, InMemoryQualityCatalog, InMemoryVariantCatalog, QualityGroup,
    StackBuilder,
};

pub type TestBuilder =
    StackBuilder<InMemoryVariantCatalog, InMemoryMaterialCatalog, InMemoryQualityCatalog>;

/// Single-extruder machine without variants or materials.
pub const SIMPLE_MACHINE: &str = "simple";
/// Dual-extruder machine with variants and materials.
pub const DUAL_MACHINE: &str = "dual";

/// Registry holding both fixture machines, their extruders, and profiles.
pub fn registry() -> ContainerRegistry {
    let mut registry = ContainerRegistry::new();

    registry
        .add_definition(
            Definition::new("fdmprinter")
                .with_name("FFF Printer")
                .with_default("layer_height", 0.1)
                .with_default("infill_sparse_density", 20)
                .with_default("material_diameter", 2.85)
                .with_default("adhesion_type", "brim"),
        )
        .unwrap();
    registry
        .add_definition(
            Definition::new("fdmextruder")
                .with_name("Extruder")
                .with_default("machine_nozzle_size", 0.4),
        )
        .unwrap();

    registry
        .add_definition(
            Definition::new(SIMPLE_MACHINE)
                .with_name("Simple Printer")
                .with_inherits("fdmprinter")
                .with_metadata("preferred_quality_type", "normal")
                .with_default("material_diameter", 1.75)
                .with_extruder_train("0", "simple_extruder_0"),
        )
        .unwrap();
    registry
        .add_definition(
            Definition::new("simple_extruder_0")
                .with_name("Extruder 1")
                .with_inherits("fdmextruder")
                .with_metadata("position", "0"),
        )
        .unwrap();

    registry
        .add_definition(
            Definition::new(DUAL_MACHINE)
                .with_name("Dual Printer")
                .with_inherits("fdmprinter")
                .with_metadata("has_variants", "True")
                .with_metadata("has_materials", "1")
                .with_metadata("preferred_variant_name", "0.4 mm")
                .with_metadata("preferred_material", "generic_pla")
                .with_metadata("preferred_quality_type", "fast")
                .with_extruder_train("0", "dual_extruder_left")
                .with_extruder_train("1", "dual_extruder_right"),
        )
        .unwrap();
    registry
        .add_definition(
            Definition::new("dual_extruder_left")
                .with_name("Left")
                .with_inherits("fdmextruder")
                .with_metadata("position", "0"),
        )
        .unwrap();
    registry
        .add_definition(
            Definition::new("dual_extruder_right")
                .with_name("Right")
                .with_inherits("fdmextruder")
                .with_metadata("position", "1")
                .with_default("machine_nozzle_size", 0.6),
        )
        .unwrap();

    for (id, container_type) in [
        ("simple_normal", ContainerType::Quality),
        ("simple_extruder_normal", ContainerType::Quality),
        ("dual_nozzle_04", ContainerType::Variant),
        ("dual_pla_04", ContainerType::Material),
        ("dual_global_fast", ContainerType::Quality),
        ("dual_pla_04_fast", ContainerType::Quality),
    ] {
        registry
            .add_container(Container::new(id).with_type(container_type))
            .unwrap();
    }
    registry
        .container_mut("dual_global_fast")
        .unwrap()
        .set_value("layer_height", 0.2);
    registry
        .container_mut("dual_pla_04_fast")
        .unwrap()
        .set_value("infill_sparse_density", 15);

    registry
}

pub fn builder() -> TestBuilder {
    StackBuilder::new(
        InMemoryVariantCatalog::new().with_variant(DUAL_MACHINE, "0.4 mm", "dual_nozzle_04"),
        InMemoryMaterialCatalog::new().with_material(
            DUAL_MACHINE,
            Some("0.4 mm"),
            2.85,
            "generic_pla",
            "dual_pla_04",
        ),
        InMemoryQualityCatalog::new()
            .with_group(
                SIMPLE_MACHINE,
                QualityGroup::new("Normal", "normal", "simple_normal")
                    .with_extruder(ExtruderPosition::new(0), "simple_extruder_normal"),
            )
            .with_group(
                DUAL_MACHINE,
                QualityGroup::new("Fast", "fast", "dual_global_fast")
                    .with_extruder(ExtruderPosition::new(0), "dual_pla_04_fast")
                    .with_extruder(ExtruderPosition::new(1), "dual_pla_04_fast"),
            ),
    )
}
