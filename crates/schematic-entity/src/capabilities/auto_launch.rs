use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, Attributes};
use schematic_core::Result;
use serde_json::{json, Value};

const EXPORTS: &[ExportRule] = &[ExportRule::new("auto_launch", predicates::not_null)];

/// Whether a silo launches as soon as its rocket is complete.
/// Unset leaves the choice to the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoLaunch {
    auto_launch: Option<bool>,
}

impl AutoLaunch {
    pub fn auto_launch(&self) -> Option<bool> {
        self.auto_launch
    }

    pub fn set_auto_launch(&mut self, auto_launch: Option<bool>) {
        self.auto_launch = auto_launch;
    }
}

impl Capability for AutoLaunch {
    fn absorb(&mut self, attrs: &mut Attributes, _cx: &mut Context<'_>) -> Result<()> {
        if let Some(value) = attrs.take("auto_launch") {
            self.auto_launch = expect_attribute("auto_launch", &value)?;
        }
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        let value = self.auto_launch.map(|b| json!(b)).unwrap_or(Value::Null);
        out.insert("auto_launch".to_string(), value);
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
