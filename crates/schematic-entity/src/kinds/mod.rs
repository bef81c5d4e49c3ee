//! Concrete entity kinds

mod burner_generator;
mod electric_pole;
mod fluid_wagon;
mod logistic_buffer_container;
mod mining_drill;
mod rocket_silo;

pub use burner_generator::BurnerGenerator;
pub use electric_pole::ElectricPole;
pub use fluid_wagon::FluidWagon;
pub use logistic_buffer_container::LogisticBufferContainer;
pub use mining_drill::MiningDrill;
pub use rocket_silo::RocketSilo;

use crate::entity::EntityKind;
use crate::entity_like::EntityLike;
use schematic_catalog::{Attributes, EntityPrototype, PrototypeCatalog};
use schematic_core::{Result, SchematicError, WarningSink};
use std::sync::Arc;

/// Diagnostic names of every kind, in catalog listing order
pub const KINDS: &[&str] = &[
    MiningDrill::KIND,
    BurnerGenerator::KIND,
    LogisticBufferContainer::KIND,
    FluidWagon::KIND,
    RocketSilo::KIND,
    ElectricPole::KIND,
];

/// The kind that builds entities of this prototype, if any
pub fn kind_of(prototype: &EntityPrototype) -> Option<&'static str> {
    let kind = match prototype.entity_type.as_str() {
        "mining-drill" => MiningDrill::KIND,
        "burner-generator" => BurnerGenerator::KIND,
        "logistic-container" if prototype.logistic_mode.as_deref() == Some("buffer") => {
            LogisticBufferContainer::KIND
        }
        "fluid-wagon" => FluidWagon::KIND,
        "rocket-silo" => RocketSilo::KIND,
        "electric-pole" => ElectricPole::KIND,
        _ => return None,
    };
    Some(kind)
}

/// Build whichever kind handles the prototype called `name`
pub fn new_entity(
    catalog: &Arc<PrototypeCatalog>,
    name: &str,
    attrs: Attributes,
    warnings: &mut dyn WarningSink,
) -> Result<Box<dyn EntityLike>> {
    let prototype = catalog
        .entity(name)
        .ok_or_else(|| SchematicError::UnknownEntity(name.to_string()))?;
    let kind = kind_of(prototype).ok_or_else(|| SchematicError::UnknownEntity(name.to_string()))?;

    tracing::debug!(name, kind, "building entity");

    let entity_type = prototype.entity_type.as_str();
    let name = Some(name);
    let entity: Box<dyn EntityLike> = match entity_type {
        "mining-drill" => Box::new(MiningDrill::new(catalog, name, attrs, warnings)?),
        "burner-generator" => Box::new(BurnerGenerator::new(catalog, name, attrs, warnings)?),
        "logistic-container" => {
            Box::new(LogisticBufferContainer::new(catalog, name, attrs, warnings)?)
        }
        "fluid-wagon" => Box::new(FluidWagon::new(catalog, name, attrs, warnings)?),
        "rocket-silo" => Box::new(RocketSilo::new(catalog, name, attrs, warnings)?),
        "electric-pole" => Box::new(ElectricPole::new(catalog, name, attrs, warnings)?),
        other => return Err(SchematicError::UnknownEntity(other.to_string())),
    };
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_like::AsEntityLike;
    use schematic_core::Warning;
    use serde_json::{json, Value};
    use std::ptr;

    #[test]
    fn test_dispatch_by_type() {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();

        let drill = new_entity(&catalog, "pumpjack", Attributes::new(), &mut warnings).unwrap();
        assert!(drill.as_any().is::<MiningDrill>());
        assert_eq!(drill.name(), "pumpjack");

        let chest =
            new_entity(&catalog, "logistic-chest-buffer", Attributes::new(), &mut warnings)
                .unwrap();
        assert!(chest.as_any().is::<LogisticBufferContainer>());

        let pole = new_entity(&catalog, "substation", Attributes::new(), &mut warnings).unwrap();
        assert!(pole.as_any().downcast_ref::<ElectricPole>().is_some());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_names() {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();

        assert!(matches!(
            new_entity(&catalog, "assembling-machine-1", Attributes::new(), &mut warnings),
            Err(SchematicError::UnknownEntity(_))
        ));
        // Known prototype without a kind
        assert!(matches!(
            new_entity(&catalog, "logistic-chest-storage", Attributes::new(), &mut warnings),
            Err(SchematicError::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_attributes_reach_the_kind() {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();
        let attrs = Attributes::new()
            .with("orientation", 0.75)
            .with("id", "tanker");

        let wagon = new_entity(&catalog, "fluid-wagon", attrs, &mut warnings).unwrap();
        let record = wagon.to_record().unwrap();
        assert_eq!(record.get("orientation"), Some(&json!(0.75)));
        assert!(!record.contains_key("id"));
        assert_eq!(wagon.id(), Some("tanker"));
    }

    #[test]
    fn test_plain_entity_resolves_to_itself() {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();
        let silo = new_entity(&catalog, "rocket-silo", Attributes::new(), &mut warnings).unwrap();

        let resolved = silo.get();
        assert_eq!(resolved.len(), 1);
        assert!(ptr::addr_eq(resolved[0].entity, &*silo));
        assert_eq!(resolved[0].to_record(), silo.to_record());
    }

    #[test]
    fn test_wrong_types_name_the_field() {
        let catalog = PrototypeCatalog::base();
        let cases = [
            ("electric-mining-drill", "direction", json!("north")),
            ("electric-mining-drill", "items", json!(["speed-module"])),
            ("electric-mining-drill", "item_requests", json!(["speed-module"])),
            ("electric-mining-drill", "control_behavior", json!(["circuit_condition"])),
            ("electric-mining-drill", "connections", json!([1])),
            ("logistic-chest-buffer", "bar", json!("x")),
            ("logistic-chest-buffer", "request_filters", json!({ "index": 1 })),
            ("fluid-wagon", "orientation", json!("east")),
            ("rocket-silo", "auto_launch", json!("yes")),
            ("small-electric-pole", "neighbours", json!("2")),
        ];

        for (name, key, value) in cases {
            let mut warnings: Vec<Warning> = Vec::new();
            let attrs = Attributes::new().with(key, value);
            let result = new_entity(&catalog, name, attrs, &mut warnings);
            let field = match result {
                Err(SchematicError::InvalidFieldType { field, .. }) => Some(field),
                _ => None,
            };
            assert_eq!(field.as_deref(), Some(key), "{} with a wrong-typed '{}'", name, key);
        }
    }

    #[test]
    fn test_null_means_default() {
        let catalog = PrototypeCatalog::base();
        let cases = [
            ("electric-mining-drill", "direction"),
            ("electric-mining-drill", "items"),
            ("electric-mining-drill", "item_requests"),
            ("electric-mining-drill", "control_behavior"),
            ("electric-mining-drill", "connections"),
            ("logistic-chest-buffer", "bar"),
            ("logistic-chest-buffer", "request_filters"),
            ("logistic-chest-buffer", "control_behavior"),
            ("fluid-wagon", "orientation"),
            ("rocket-silo", "auto_launch"),
            ("small-electric-pole", "neighbours"),
        ];

        for (name, key) in cases {
            let mut warnings: Vec<Warning> = Vec::new();
            let attrs = Attributes::new().with(key, Value::Null);
            let entity = new_entity(&catalog, name, attrs, &mut warnings).unwrap();
            let record = entity.to_record().unwrap();
            assert!(!record.contains_key(key), "{} exported a null '{}'", name, key);
            assert!(warnings.is_empty());
        }
    }

    fn rejected_kind<T>(result: Result<T>) -> Option<String> {
        match result {
            Err(SchematicError::InvalidEntityName { kind, .. }) => Some(kind),
            _ => None,
        }
    }

    #[test]
    fn test_every_kind_checks_its_name() {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();
        let none = Attributes::new;

        let cases = [
            (
                MiningDrill::KIND,
                rejected_kind(MiningDrill::new(
                    &catalog,
                    Some("rocket-silo"),
                    none(),
                    &mut warnings,
                )),
            ),
            (
                BurnerGenerator::KIND,
                rejected_kind(BurnerGenerator::new(
                    &catalog,
                    Some("rocket-silo"),
                    none(),
                    &mut warnings,
                )),
            ),
            (
                LogisticBufferContainer::KIND,
                rejected_kind(LogisticBufferContainer::new(
                    &catalog,
                    Some("rocket-silo"),
                    none(),
                    &mut warnings,
                )),
            ),
            (
                FluidWagon::KIND,
                rejected_kind(FluidWagon::new(
                    &catalog,
                    Some("rocket-silo"),
                    none(),
                    &mut warnings,
                )),
            ),
            (
                RocketSilo::KIND,
                rejected_kind(RocketSilo::new(
                    &catalog,
                    Some("fluid-wagon"),
                    none(),
                    &mut warnings,
                )),
            ),
            (
                ElectricPole::KIND,
                rejected_kind(ElectricPole::new(
                    &catalog,
                    Some("rocket-silo"),
                    none(),
                    &mut warnings,
                )),
            ),
        ];

        for (kind, rejected) in cases {
            assert_eq!(rejected.as_deref(), Some(kind));
        }
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_every_kind_is_listed() {
        let catalog = PrototypeCatalog::base();
        let mut found: Vec<&str> = catalog
            .names_where(|p| kind_of(p).is_some())
            .into_iter()
            .filter_map(|name| catalog.entity(name).and_then(kind_of))
            .collect();
        found.dedup();
        assert_eq!(found, KINDS);
    }
}
