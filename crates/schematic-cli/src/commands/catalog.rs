//! Catalog listing command

use super::load_catalog;
use anyhow::Result;
use schematic_catalog::PrototypeCatalog;
use schematic_entity::{kind_of, kinds::KINDS};

pub fn run(kind: Option<&str>, catalogs: &[String]) -> Result<()> {
    let catalog = load_catalog(catalogs)?;

    let selected: Vec<&str> = match kind {
        Some(kind) if KINDS.contains(&kind) => vec![kind],
        Some(kind) => {
            println!("Kind '{}' not found.", kind);
            println!();
            println!("Available kinds:");
            for k in KINDS {
                println!("  - {}", k);
            }
            return Ok(());
        }
        None => KINDS.to_vec(),
    };

    for (i, kind) in selected.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}:", kind);
        print_prototypes(&catalog, kind);
    }

    Ok(())
}

fn print_prototypes(catalog: &PrototypeCatalog, kind: &str) {
    let names = catalog.names_where(|p| kind_of(p) == Some(kind));
    if names.is_empty() {
        println!("  (no prototypes)");
        return;
    }

    for (i, name) in names.iter().enumerate() {
        let Some(prototype) = catalog.entity(name) else {
            continue;
        };
        let default = if i == 0 { " (default)" } else { "" };
        println!(
            "  - {} [{}x{}]{}",
            name, prototype.tile_width, prototype.tile_height, default
        );
    }
}
