//! Inspect command: build entities from JSON and print their records

use super::load_catalog;
use anyhow::{anyhow, bail, Context, Result};
use schematic_catalog::{Attributes, PrototypeCatalog};
use schematic_collection::{EntityCollection, Group};
use schematic_core::{LogSink, WarningSink};
use schematic_entity::{new_entity, parse_position, EntityLike};
use serde_json::Value;
use std::fs;
use std::sync::Arc;

pub fn run(file: &str, catalogs: &[String]) -> Result<()> {
    let catalog = load_catalog(catalogs)?;

    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read entity file: {}", file))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse entity file: {}", file))?;

    let mut sink = LogSink;
    let collection = build_collection(&catalog, value, &mut sink)?;
    tracing::info!(entities = collection.len(), "built collection");

    let records = collection.to_records()?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Build every entity of a JSON array (or an object with an `entities`
/// array) into one collection
pub fn build_collection(
    catalog: &Arc<PrototypeCatalog>,
    value: Value,
    warnings: &mut dyn WarningSink,
) -> Result<EntityCollection> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("entities") {
            Some(Value::Array(items)) => items,
            _ => bail!("Expected an 'entities' array"),
        },
        _ => bail!("Expected an array of entities"),
    };

    let mut collection = EntityCollection::new();
    for (i, item) in items.into_iter().enumerate() {
        let entity =
            build_entity(catalog, item, warnings).with_context(|| format!("Entity #{}", i + 1))?;
        collection.append(entity)?;
    }
    Ok(collection)
}

/// Objects with an `entities` array become groups; anything else is built by
/// prototype name
fn build_entity(
    catalog: &Arc<PrototypeCatalog>,
    item: Value,
    warnings: &mut dyn WarningSink,
) -> Result<Box<dyn EntityLike>> {
    let mut attrs = Attributes::from_value(item)?;

    if let Some(children) = attrs.take("entities") {
        return build_group(catalog, attrs, children, warnings);
    }

    let name: String = attrs
        .take_as("name")?
        .ok_or_else(|| anyhow!("Missing 'name'"))?;
    Ok(new_entity(catalog, &name, attrs, warnings)?)
}

fn build_group(
    catalog: &Arc<PrototypeCatalog>,
    mut attrs: Attributes,
    children: Value,
    warnings: &mut dyn WarningSink,
) -> Result<Box<dyn EntityLike>> {
    let id: String = attrs
        .take_as("id")?
        .ok_or_else(|| anyhow!("Groups need an 'id'"))?;
    let mut group = Group::new(id);

    if let Some(name) = attrs.take_as::<String>("name")? {
        group.set_name(name);
    }
    if let Some(group_type) = attrs.take_as::<String>("type")? {
        group.set_type(group_type);
    }
    if let Some(position) = attrs.take("position") {
        if !position.is_null() {
            group.set_position(parse_position("position", &position)?)?;
        }
    }
    attrs.report_unused("Group", warnings);

    let Value::Array(children) = children else {
        bail!("Group 'entities' must be an array");
    };
    for (i, child) in children.into_iter().enumerate() {
        let entity = build_entity(catalog, child, warnings)
            .with_context(|| format!("Group member #{}", i + 1))?;
        group.append(entity)?;
    }
    Ok(Box::new(group))
}
