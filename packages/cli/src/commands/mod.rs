pub mod apply;
pub mod inspect;
pub mod zone;

pub use apply::{apply, ApplyArgs};
pub use inspect::{inspect, InspectArgs};
pub use zone::{add_zone, move_zone, AddZoneArgs, MoveZoneArgs};

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use facsimile_editor::{Bounds, DocumentStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Read an MEI file into a store set up from the config
pub(crate) fn open_store(file: &Path, config: &Config) -> Result<DocumentStore> {
    let xml = fs::read_to_string(file).with_context(|| format!("Cannot read {}", file.display()))?;

    let mut store = match &config.id_seed {
        Some(seed) => DocumentStore::with_id_seed(seed.as_str()),
        None => DocumentStore::new(),
    };
    store.load_xml(&xml)?;

    if config.multi_zone {
        store.toggle_multi_zone_mode();
    }
    Ok(store)
}

/// Move to a zero-based page, failing when it does not exist
pub(crate) fn go_to_page(store: &mut DocumentStore, page: usize) -> Result<()> {
    if page >= store.page_count() {
        return Err(anyhow!(
            "Page {} out of range (document has {} pages)",
            page,
            store.page_count()
        ));
    }
    store.set_current_page(page);
    Ok(())
}

/// Write the edited document to `out`, or to stdout
pub(crate) fn write_output(store: &DocumentStore, out: Option<&PathBuf>) -> Result<()> {
    let xml = store
        .serialized_document()?
        .ok_or_else(|| anyhow!("No document loaded"))?;

    match out {
        Some(path) => {
            fs::write(path, xml)?;
            eprintln!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print!("{}", xml),
    }
    Ok(())
}

/// Parse `x,y,w,h`
pub(crate) fn parse_bounds(value: &str) -> Result<Bounds, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid bounds '{}': {}", value, e))?;

    match parts.as_slice() {
        [x, y, w, h] => Ok(Bounds::new(*x, *y, *w, *h)),
        _ => Err(format!("expected x,y,w,h, got '{}'", value)),
    }
}
