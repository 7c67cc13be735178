//! The `meritscope search` command.

use std::path::PathBuf;

use anyhow::Result;

use meritscope_core::config::load_config_from;
use meritscope_core::parser::{load_catalog, parse_alias_table};

pub fn execute(
    query: String,
    aliases_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let table = parse_alias_table(&aliases_path.unwrap_or_else(|| config.aliases_path()))?;

    let ids = table.find_institutions(&query);
    if ids.is_empty() {
        println!("No institutions match '{}'.", query.trim());
        return Ok(());
    }

    // Names are a nicety; search still works without a catalog.
    let catalog_path = catalog_path.unwrap_or_else(|| config.catalog_path());
    let catalog = match load_catalog(&catalog_path) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            tracing::debug!("catalog unavailable: {e:#}");
            None
        }
    };

    for id in &ids {
        match catalog.as_ref().and_then(|c| c.institution(id)) {
            Some(inst) => println!("{id}  {} ({})", inst.name, inst.short_name),
            None => println!("{id}"),
        }
    }

    Ok(())
}
