//! Schematic Core - Foundational types for the blueprint entity model
//!
//! This crate provides the types that all other schematic crates depend on:
//! - `CollectionId`, `ParentRef` - Non-owning membership handles
//! - `Position`, `CollisionBox`, `Direction` - Grid geometry
//! - `Warning`, `WarningSink` - The non-fatal diagnostic channel
//! - Error types and Result alias

mod error;
mod id;
mod types;
mod warning;

pub use error::{Result, SchematicError};
pub use id::{CollectionId, ParentRef};
pub use types::{CollisionBox, Direction, Position};
pub use warning::{LogSink, Warning, WarningSink};
