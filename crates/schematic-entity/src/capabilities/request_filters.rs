use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, Attributes, PrototypeCatalog};
use schematic_core::{Result, SchematicError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const EXPORTS: &[ExportRule] = &[ExportRule::new("request_filters", predicates::non_empty)];

/// Upper bound on logistic request slots
pub const MAX_REQUEST_SLOTS: u32 = 1000;

/// One logistic request slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestFilter {
    /// 1-based slot index
    pub index: u32,
    pub name: String,
    pub count: u32,
}

/// Logistic requests, kept sorted by slot index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilters {
    filters: Vec<RequestFilter>,
}

impl RequestFilters {
    pub fn filters(&self) -> &[RequestFilter] {
        &self.filters
    }

    /// Set or clear one slot. `None` empties it.
    pub fn set_request_filter(
        &mut self,
        catalog: &PrototypeCatalog,
        index: u32,
        item: Option<&str>,
        count: u32,
    ) -> Result<()> {
        if index == 0 || index > MAX_REQUEST_SLOTS {
            return Err(SchematicError::ValueOutOfRange {
                field: "request_filters".to_string(),
                min: 1.0,
                max: MAX_REQUEST_SLOTS as f64,
                value: index as f64,
            });
        }

        if let Some(name) = item {
            if !catalog.is_item(name) {
                return Err(SchematicError::InvalidItem(name.to_string()));
            }
        }

        self.filters.retain(|f| f.index != index);
        if let Some(name) = item {
            self.filters.push(RequestFilter {
                index,
                name: name.to_string(),
                count,
            });
            self.filters.sort_by_key(|f| f.index);
        }
        Ok(())
    }

    /// Replace every slot, numbering the requests from 1 in order
    pub fn set_request_filters(
        &mut self,
        catalog: &PrototypeCatalog,
        requests: &[(&str, u32)],
    ) -> Result<()> {
        let mut filters = RequestFilters::default();
        for (i, (name, count)) in requests.iter().enumerate() {
            filters.set_request_filter(catalog, i as u32 + 1, Some(*name), *count)?;
        }
        *self = filters;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }
}

impl Capability for RequestFilters {
    fn absorb(&mut self, attrs: &mut Attributes, cx: &mut Context<'_>) -> Result<()> {
        let Some(value) = attrs.take("request_filters") else {
            return Ok(());
        };
        let items: Vec<Value> = expect_attribute("request_filters", &value)?.unwrap_or_default();

        let mut filters = RequestFilters::default();
        for item in items {
            let filter: RequestFilter = serde_json::from_value(item).map_err(|e| {
                SchematicError::field_type(
                    "request_filters",
                    "a list of {index, name, count}",
                    e.to_string(),
                )
            })?;
            filters.set_request_filter(cx.catalog, filter.index, Some(&filter.name), filter.count)?;
        }
        *self = filters;
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        out.insert("request_filters".to_string(), json!(self.filters));
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
