use crate::commands::{go_to_page, open_store, parse_bounds, write_output};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use facsimile_editor::{Annotation, Bounds, DocumentStore};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AddZoneArgs {
    /// MEI file to edit
    pub file: PathBuf,

    /// Zero-based page index
    #[arg(short, long)]
    pub page: usize,

    /// Zone bounds as x,y,w,h in pixels
    #[arg(short, long, value_parser = parse_bounds)]
    pub bounds: Bounds,

    /// Zone id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Link the zone into the last measure instead of a new one
    #[arg(long)]
    pub multi: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MoveZoneArgs {
    /// MEI file to edit
    pub file: PathBuf,

    /// Zero-based page index
    #[arg(short, long)]
    pub page: usize,

    /// Id of the zone to move
    #[arg(long)]
    pub id: String,

    /// New bounds as x,y,w,h in pixels
    #[arg(short, long, value_parser = parse_bounds)]
    pub bounds: Bounds,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn add_zone(args: AddZoneArgs, config: &Config) -> Result<()> {
    let mut store = open_store(&args.file, config)?;
    add_zone_to(&mut store, &args)?;
    write_output(&store, args.out.as_ref())
}

pub fn move_zone(args: MoveZoneArgs, config: &Config) -> Result<()> {
    let mut store = open_store(&args.file, config)?;
    go_to_page(&mut store, args.page)?;

    let annotation = Annotation::new(args.id.as_str(), args.bounds, page_uri(&store)?);
    store.update_zone(annotation)?;
    eprintln!("{} Moved zone {}", "✓".green(), args.id.cyan());

    write_output(&store, args.out.as_ref())
}

fn add_zone_to(store: &mut DocumentStore, args: &AddZoneArgs) -> Result<()> {
    go_to_page(store, args.page)?;

    if args.multi && !store.multi_zone_active() {
        store.toggle_multi_zone_mode();
    }

    let uri = page_uri(store)?;
    let annotation = match &args.id {
        Some(id) => Annotation::new(id.as_str(), args.bounds, uri),
        None => Annotation::unassigned(args.bounds, uri),
    };

    let result = store.create_zone(annotation)?;
    eprintln!(
        "{} Added zone {} to measure {}",
        "✓".green(),
        result.zone_id.unwrap_or_default().cyan(),
        result.measure_id.unwrap_or_default().cyan()
    );
    Ok(())
}

fn page_uri(store: &DocumentStore) -> Result<String> {
    store
        .current_page()
        .map(|page| page.uri.clone())
        .ok_or_else(|| anyhow!("No current page"))
}
