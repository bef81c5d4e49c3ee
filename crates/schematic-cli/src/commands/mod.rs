//! CLI command implementations

pub mod catalog;
pub mod inspect;

use anyhow::{Context, Result};
use schematic_catalog::PrototypeCatalog;
use std::sync::Arc;

/// The bundled catalog with any extra catalog paths merged over it
pub fn load_catalog(paths: &[String]) -> Result<Arc<PrototypeCatalog>> {
    let base = PrototypeCatalog::base();
    if paths.is_empty() {
        return Ok(base);
    }

    let mut catalog = (*base).clone();
    for path in paths {
        catalog
            .load_path(path)
            .with_context(|| format!("Failed to load catalog {}", path))?;
    }
    Ok(Arc::new(catalog))
}
