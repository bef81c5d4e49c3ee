//! Capabilities: independently addable attribute bundles
//!
//! Each capability owns a slice of an entity's state. It takes its keys out
//! of the construction attributes, validates them, reports its current
//! values, and names the predicate deciding whether each value is exported.

mod auto_launch;
mod circuit;
mod control_behavior;
mod directional;
mod inventory;
mod orientation;
mod power;
mod request_filters;
mod request_items;

pub use auto_launch::AutoLaunch;
pub use circuit::{CircuitConnections, CircuitPoint, WireColor, WireTarget};
pub use control_behavior::{
    CircuitControl, Comparator, Condition, ControlBehavior, LogisticModeOfOperation, Operand,
    ResourceReadMode, SignalId,
};
pub use directional::Directional;
pub use inventory::Inventory;
pub use orientation::Orientation;
pub use power::PowerConnections;
pub use request_filters::{RequestFilter, RequestFilters};
pub use request_items::RequestItems;

use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::ExportRule;
use schematic_catalog::Attributes;
use schematic_core::Result;

/// One attribute bundle of a concrete entity
pub trait Capability {
    /// Take the keys this capability owns out of `attrs` and validate them.
    ///
    /// A key that is absent leaves the current value alone; a key given as
    /// null resets it to its default.
    fn absorb(&mut self, attrs: &mut Attributes, cx: &mut Context<'_>) -> Result<()>;

    /// Write the current value of every owned field
    fn write_fields(&self, out: &mut Record);

    fn export_rules(&self) -> &'static [ExportRule];
}
