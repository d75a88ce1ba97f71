//! Stack Builder
//!
//! Orchestrates machine creation:
//! 1. Look up the machine definition (absence is soft: `Ok(None)`)
//! 2. Resolve the preferred variant and material through the catalogs
//! 3. Validate every extruder train before anything is registered
//! 4. Allocate a unique machine name
//! 5. Build the global stack, then one extruder stack per train
//! 6. Apply the preferred quality group to the global stack and each extruder
//! 7. Register the global stack last, once all its extruders are registered
//!
//! Malformed definition data (a promised variant, material, quality, or
//! extruder that cannot be found) is a consistency error and aborts the build.

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::entities::{Container, ContainerStack, Definition, ExtruderStack, GlobalStack};
use crate::domain::ports::{approximate_diameter, MaterialLookup, QualityLookup, VariantLookup};
use crate::domain::services::SettingResolver;
use crate::domain::value_objects::{ContainerType, ExtruderPosition, Slot};
use crate::error::{StackError, StackResult};
use crate::registry::{ContainerQuery, ContainerRegistry, NameScope};

use super::journal::RegistrationJournal;

/// Metadata key on a user-changes container naming the stack that owns it.
#[derive(Debug, Clone, Copy)]
enum Owner {
    Machine,
    Extruder,
}

impl Owner {
    fn metadata_key(&self) -> &'static str {
        match self {
            Owner::Machine => "machine",
            Owner::Extruder => "extruder",
        }
    }
}

/// Machine construction use case, parameterized by its catalog ports.
pub struct StackBuilder<V, M, Q>
where
    V: VariantLookup,
    M: MaterialLookup,
    Q: QualityLookup,
{
    variants: V,
    materials: M,
    qualities: Q,
    config: EngineConfig,
}

impl<V, M, Q> StackBuilder<V, M, Q>
where
    V: VariantLookup,
    M: MaterialLookup,
    Q: QualityLookup,
{
    pub fn new(variants: V, materials: M, qualities: Q) -> Self {
        Self {
            variants,
            materials,
            qualities,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create and register a new machine named (at least approximately) `name`.
    ///
    /// Returns `Ok(None)` when `definition_id` is not a registered definition.
    /// On error nothing from this call stays registered, unless
    /// `builder.rollback_on_error` is disabled.
    pub fn create_machine(
        &self,
        registry: &mut ContainerRegistry,
        name: &str,
        definition_id: &str,
    ) -> StackResult<Option<GlobalStack>> {
        let mut journal = RegistrationJournal::new();
        let result = self.build_machine(registry, &mut journal, name, definition_id);
        if let Err(e) = &result {
            if self.config.builder.rollback_on_error {
                journal.rollback(registry);
            } else {
                warn!(
                    error = %e,
                    orphans = ?journal.registered_ids(),
                    "machine build failed; partially registered entities remain"
                );
            }
        }
        result
    }

    /// Build a global stack over `definition` with fresh user-changes and
    /// definition-changes containers. The stack itself is not registered.
    pub fn create_global_stack(
        &self,
        registry: &mut ContainerRegistry,
        stack_id: &str,
        definition: &Definition,
        variant: &Container,
        material: &Container,
        quality: &Container,
    ) -> StackResult<GlobalStack> {
        let mut journal = RegistrationJournal::new();
        self.build_global_stack(
            registry,
            &mut journal,
            stack_id,
            definition,
            variant,
            material,
            quality,
        )
    }

    /// Build an extruder stack at `position` with fresh user-changes and
    /// definition-changes containers. The stack itself is not registered.
    #[allow(clippy::too_many_arguments)]
    pub fn create_extruder_stack(
        &self,
        registry: &mut ContainerRegistry,
        stack_id: &str,
        extruder_definition: &Definition,
        machine_definition_id: &str,
        position: ExtruderPosition,
        variant: &Container,
        material: &Container,
        quality: &Container,
    ) -> StackResult<ExtruderStack> {
        let mut journal = RegistrationJournal::new();
        self.build_extruder_stack(
            registry,
            &mut journal,
            stack_id,
            extruder_definition,
            machine_definition_id,
            position,
            variant,
            material,
            quality,
        )
    }

    fn build_machine(
        &self,
        registry: &mut ContainerRegistry,
        journal: &mut RegistrationJournal,
        name: &str,
        definition_id: &str,
    ) -> StackResult<Option<GlobalStack>> {
        let Some(machine_definition) = registry
            .find_definition_containers(&ContainerQuery::new().id(definition_id))
            .into_iter()
            .next()
            .cloned()
        else {
            warn!(definition = %definition_id, "definition was not found");
            return Ok(None);
        };

        let (variant, variant_name) = self.preferred_variant(registry, &machine_definition)?;
        let material =
            self.preferred_material(registry, &machine_definition, variant_name.as_deref())?;
        let extruder_definitions = self.extruder_definitions(registry, &machine_definition)?;

        let machine_name = self.machine_name(registry, name, &machine_definition);
        // The global stack is registered last; its extruders must not take its id.
        journal.reserve(machine_name.clone());

        let empty_variant = registry.empty_container(Slot::Variant)?.clone();
        let empty_material = registry.empty_container(Slot::Material)?.clone();
        let empty_quality = registry.empty_container(Slot::Quality)?.clone();

        // The preferred variant and material go to the extruders only; the
        // global stack keeps the empty ones.
        let mut global = self.build_global_stack(
            registry,
            journal,
            &machine_name,
            &machine_definition,
            &empty_variant,
            &empty_material,
            &empty_quality,
        )?;
        global.stack_mut().set_name(machine_name.clone());

        for (position, extruder_definition) in &extruder_definitions {
            let extruder_id = journal.unique_name(registry, extruder_definition.id());
            let mut extruder = self.build_extruder_stack(
                registry,
                journal,
                &extruder_id,
                extruder_definition,
                machine_definition.id(),
                *position,
                &variant,
                &material,
                &empty_quality,
            )?;
            global.add_extruder(&mut extruder)?;
            journal.add_extruder_stack(registry, extruder)?;
        }

        self.apply_preferred_quality(registry, &mut global, &machine_definition)?;

        let global_id = global.id().to_string();
        journal.add_global_stack(registry, global)?;
        info!(
            machine = %global_id,
            definition = %definition_id,
            extruders = extruder_definitions.len(),
            "machine created"
        );

        Ok(registry.global_stack(&global_id).cloned())
    }

    fn preferred_variant(
        &self,
        registry: &ContainerRegistry,
        definition: &Definition,
    ) -> StackResult<(Container, Option<String>)> {
        let empty = registry.empty_container(Slot::Variant)?.clone();
        if !definition.has_variants() {
            return Ok((empty, None));
        }
        let Some(variant_name) = definition.preferred_variant_name() else {
            return Ok((empty, None));
        };

        let node = self
            .variants
            .variant_node(definition.id(), variant_name)
            .ok_or_else(|| {
                StackError::consistency(format!(
                    "cannot find variant with definition [{}] and variant name [{}]",
                    definition.id(),
                    variant_name
                ))
            })?;
        let container = registered(registry, &node.container_id)?;
        debug!(variant = %container.id(), "preferred variant resolved");
        Ok((container, Some(variant_name.to_string())))
    }

    fn preferred_material(
        &self,
        registry: &ContainerRegistry,
        definition: &Definition,
        variant_name: Option<&str>,
    ) -> StackResult<Container> {
        if !definition.has_materials() {
            return Ok(registry.empty_container(Slot::Material)?.clone());
        }

        let diameter = SettingResolver::new(registry)
            .definition_value(definition.id(), "material_diameter")?
            .and_then(|value| value.as_f64())
            .ok_or_else(|| {
                StackError::consistency(format!(
                    "definition [{}] has materials but no numeric material_diameter",
                    definition.id()
                ))
            })?;
        let preferred = definition.preferred_material().ok_or_else(|| {
            StackError::consistency(format!(
                "definition [{}] has materials but no preferred_material",
                definition.id()
            ))
        })?;
        let root_material_id = self
            .materials
            .root_material_id_for_diameter(preferred, &approximate_diameter(diameter));

        let node = self
            .materials
            .material_node(definition.id(), variant_name, diameter, &root_material_id)
            .ok_or_else(|| {
                StackError::consistency(format!(
                    "cannot find material with definition [{}], variant_name [{}], and root_material_id [{}]",
                    definition.id(),
                    variant_name.unwrap_or("<none>"),
                    root_material_id
                ))
            })?;
        let container = registered(registry, &node.container_id)?;
        debug!(material = %container.id(), "preferred material resolved");
        Ok(container)
    }

    /// Every extruder train of `machine_definition`, checked and ordered by position.
    fn extruder_definitions(
        &self,
        registry: &ContainerRegistry,
        machine_definition: &Definition,
    ) -> StackResult<Vec<(ExtruderPosition, Definition)>> {
        let mut resolved: Vec<(ExtruderPosition, Definition)> = Vec::new();

        for (listed_position, extruder_definition_id) in machine_definition.extruder_trains() {
            let position: ExtruderPosition = listed_position.parse().map_err(|_| {
                StackError::consistency(format!(
                    "machine definition [{}] lists extruder [{}] at invalid position [{}]",
                    machine_definition.id(),
                    extruder_definition_id,
                    listed_position
                ))
            })?;

            let extruder_definition = registry
                .definition(extruder_definition_id)
                .ok_or_else(|| {
                    StackError::consistency(format!(
                        "extruder definition [{}] listed by machine definition [{}] was not found",
                        extruder_definition_id,
                        machine_definition.id()
                    ))
                })?;

            let declared = extruder_definition.position();
            let declared_position = declared.and_then(|p| p.parse::<ExtruderPosition>().ok());
            if declared_position != Some(position) {
                return Err(StackError::consistency(format!(
                    "extruder position [{}] defined in extruder definition [{}] is not the same as in machine definition [{}] position [{}]",
                    declared.unwrap_or("<none>"),
                    extruder_definition_id,
                    machine_definition.id(),
                    listed_position
                )));
            }

            if resolved.iter().any(|(p, _)| *p == position) {
                return Err(StackError::consistency(format!(
                    "machine definition [{}] lists more than one extruder at position [{}]",
                    machine_definition.id(),
                    position
                )));
            }
            resolved.push((position, extruder_definition.clone()));
        }

        if resolved.is_empty() {
            return Err(StackError::consistency(format!(
                "machine definition [{}] declares no extruder trains",
                machine_definition.id()
            )));
        }

        resolved.sort_by_key(|(position, _)| *position);
        Ok(resolved)
    }

    /// Unique among stacks first, then against every other id, so a machine can
    /// never shadow a definition or profile.
    fn machine_name(
        &self,
        registry: &ContainerRegistry,
        name: &str,
        definition: &Definition,
    ) -> String {
        let generated = registry.create_unique_name(NameScope::Machine, "", name, definition.name());
        if registry
            .find_containers_metadata(&ContainerQuery::new().id(generated.clone()))
            .is_empty()
        {
            generated
        } else {
            registry.unique_name(&generated)
        }
    }

    fn apply_preferred_quality(
        &self,
        registry: &mut ContainerRegistry,
        global: &mut GlobalStack,
        machine_definition: &Definition,
    ) -> StackResult<()> {
        let quality_type = machine_definition.preferred_quality_type().ok_or_else(|| {
            StackError::consistency(format!(
                "definition [{}] declares no preferred_quality_type",
                machine_definition.id()
            ))
        })?;

        let groups = self.qualities.quality_groups(global);
        let group = groups.get(quality_type).ok_or_else(|| {
            StackError::consistency(format!(
                "no quality group [{}] available for machine [{}]",
                quality_type,
                global.id()
            ))
        })?;

        let global_quality = registered(registry, &group.global_container_id)?;
        let mut extruder_qualities = Vec::with_capacity(global.extruder_count());
        for (position, extruder_id) in global.extruders() {
            let container_id = group.extruder_container_id(*position).ok_or_else(|| {
                StackError::consistency(format!(
                    "quality group [{}] has no quality for extruder position [{}]",
                    quality_type, position
                ))
            })?;
            extruder_qualities.push((extruder_id.clone(), registered(registry, container_id)?));
        }

        global.stack_mut().set_slot(Slot::Quality, &global_quality)?;
        for (extruder_id, quality) in extruder_qualities {
            registry
                .extruder_stack_mut(&extruder_id)
                .ok_or_else(|| StackError::UnknownStack {
                    id: extruder_id.clone(),
                })?
                .stack_mut()
                .set_slot(Slot::Quality, &quality)?;
        }
        debug!(quality_type = %quality_type, machine = %global.id(), "quality applied");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_global_stack(
        &self,
        registry: &mut ContainerRegistry,
        journal: &mut RegistrationJournal,
        stack_id: &str,
        definition: &Definition,
        variant: &Container,
        material: &Container,
        quality: &Container,
    ) -> StackResult<GlobalStack> {
        let mut global = GlobalStack::new(stack_id, definition);
        self.attach_definition_changes(registry, journal, global.stack_mut())?;
        let user = self.user_changes_container(
            registry,
            journal,
            stack_id,
            definition.id(),
            Owner::Machine,
        );

        wire_overrides(global.stack_mut(), variant, material, quality, &user)?;

        // Registered only once every slot is wired.
        journal.add_container(registry, user)?;
        Ok(global)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_extruder_stack(
        &self,
        registry: &mut ContainerRegistry,
        journal: &mut RegistrationJournal,
        stack_id: &str,
        extruder_definition: &Definition,
        machine_definition_id: &str,
        position: ExtruderPosition,
        variant: &Container,
        material: &Container,
        quality: &Container,
    ) -> StackResult<ExtruderStack> {
        let mut extruder = ExtruderStack::new(stack_id, extruder_definition, position);
        extruder.stack_mut().set_name(extruder_definition.name());
        self.attach_definition_changes(registry, journal, extruder.stack_mut())?;
        let user = self.user_changes_container(
            registry,
            journal,
            stack_id,
            machine_definition_id,
            Owner::Extruder,
        );

        wire_overrides(extruder.stack_mut(), variant, material, quality, &user)?;

        journal.add_container(registry, user)?;
        Ok(extruder)
    }

    /// Allocated after the definition-changes container is registered, so the
    /// two never share an id even when their suffixes are equal.
    fn user_changes_container(
        &self,
        registry: &ContainerRegistry,
        journal: &RegistrationJournal,
        stack_id: &str,
        definition_id: &str,
        owner: Owner,
    ) -> Container {
        let id = journal.unique_name(
            registry,
            &format!(
                "{}{}",
                stack_id, self.config.naming.user_changes_suffix
            ),
        );
        Container::new(id)
            .with_definition(definition_id)
            .with_type(ContainerType::User)
            .with_metadata(
                "setting_version",
                self.config.format.setting_version.to_string(),
            )
            .with_metadata(owner.metadata_key(), stack_id)
    }

    /// Create, register, and slot a fresh definition-changes container for `stack`.
    fn attach_definition_changes(
        &self,
        registry: &mut ContainerRegistry,
        journal: &mut RegistrationJournal,
        stack: &mut ContainerStack,
    ) -> StackResult<()> {
        let id = journal.unique_name(
            registry,
            &format!(
                "{}{}",
                stack.id(),
                self.config.naming.definition_changes_suffix
            ),
        );
        let container = Container::new(id)
            .with_definition(stack.definition_id())
            .with_type(ContainerType::DefinitionChanges)
            .with_metadata(
                "setting_version",
                self.config.format.setting_version.to_string(),
            );

        stack.set_slot(Slot::DefinitionChanges, &container)?;
        journal.add_container(registry, container)
    }
}

fn wire_overrides(
    stack: &mut ContainerStack,
    variant: &Container,
    material: &Container,
    quality: &Container,
    user: &Container,
) -> StackResult<()> {
    stack.set_slot(Slot::Variant, variant)?;
    stack.set_slot(Slot::Material, material)?;
    stack.set_slot(Slot::Quality, quality)?;
    stack.clear_slot(Slot::QualityChanges);
    stack.set_slot(Slot::UserChanges, user)
}

fn registered(registry: &ContainerRegistry, id: &str) -> StackResult<Container> {
    registry
        .container(id)
        .cloned()
        .ok_or_else(|| StackError::UnknownContainer { id: id.to_string() })
}
