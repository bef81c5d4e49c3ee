use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, value_type_name, Attributes, PrototypeCatalog};
use schematic_core::{Result, SchematicError, Warning};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

const EXPORTS: &[ExportRule] = &[ExportRule::new("items", predicates::non_empty)];

/// Accepts items an entity can actually hold
pub type ItemLimitation = fn(&PrototypeCatalog, &str) -> bool;

/// Items to be delivered into the entity by construction robots
/// (modules, fuel), as item name -> count.
#[derive(Clone, Default)]
pub struct RequestItems {
    items: BTreeMap<String, u32>,
    limitation: Option<ItemLimitation>,
}

impl RequestItems {
    /// Requests limited to items for which `limitation` holds. Other known
    /// items are still stored, with a warning.
    pub fn limited_to(limitation: ItemLimitation) -> Self {
        Self {
            items: BTreeMap::new(),
            limitation: Some(limitation),
        }
    }

    pub fn items(&self) -> &BTreeMap<String, u32> {
        &self.items
    }

    /// Request `count` of `item`; a count of zero drops the request.
    ///
    /// Fails with `InvalidItem` for names the catalog does not know.
    pub fn set_item_request(&mut self, item: &str, count: u32, cx: &mut Context<'_>) -> Result<()> {
        if !cx.catalog.is_item(item) {
            return Err(SchematicError::InvalidItem(item.to_string()));
        }

        if count == 0 {
            self.items.remove(item);
            return Ok(());
        }

        if let Some(limitation) = self.limitation {
            if !limitation(cx.catalog, item) {
                cx.warnings.warn(Warning::ItemLimitation {
                    kind: cx.kind.to_string(),
                    item: item.to_string(),
                });
            }
        }

        self.items.insert(item.to_string(), count);
        Ok(())
    }

    pub fn remove_item_request(&mut self, item: &str) {
        self.items.remove(item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn absorb_map(&mut self, field: &str, value: &Value, cx: &mut Context<'_>) -> Result<()> {
        let requests: Map<String, Value> = expect_attribute(field, value)?.unwrap_or_default();
        for (item, count) in &requests {
            let count = count
                .as_u64()
                .and_then(|c| u32::try_from(c).ok())
                .ok_or_else(|| {
                    SchematicError::field_type(
                        field,
                        "a dict of item counts",
                        value_type_name(count),
                    )
                })?;
            self.set_item_request(item, count, cx)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for RequestItems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestItems")
            .field("items", &self.items)
            .field("limited", &self.limitation.is_some())
            .finish()
    }
}

impl Capability for RequestItems {
    fn absorb(&mut self, attrs: &mut Attributes, cx: &mut Context<'_>) -> Result<()> {
        // `item_requests` is accepted as an alias of the exported `items` key.
        let items = attrs.take("items");
        let aliased = attrs.take("item_requests");
        if items.is_none() && aliased.is_none() {
            return Ok(());
        }

        self.items.clear();
        if let Some(value) = items {
            self.absorb_map("items", &value, cx)?;
        }
        if let Some(value) = aliased {
            self.absorb_map("item_requests", &value, cx)?;
        }
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        out.insert("items".to_string(), json!(self.items));
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
