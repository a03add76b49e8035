use crate::commands::open_store;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use facsimile_editor::DocumentStore;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// MEI file to inspect
    pub file: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn inspect(args: InspectArgs, config: &Config) -> Result<()> {
    let mut store = open_store(&args.file, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary(&mut store))?);
        return Ok(());
    }

    println!("{} {}", "📄".bright_blue(), args.file.display().to_string().bold());
    println!();

    for index in 0..store.page_count() {
        store.set_current_page(index);
        let zones = store.zones_on_current_page();
        let uri = store.current_page().map(|p| p.uri.clone()).unwrap_or_default();

        println!("  {} {} ({} zones)", format!("[{}]", index).dimmed(), uri, zones.len());
        for zone in zones {
            let b = zone.bounds;
            println!(
                "      {} x={} y={} w={} h={}",
                zone.id.unwrap_or_default().cyan(),
                b.x,
                b.y,
                b.w,
                b.h
            );
        }
    }

    let measures = store.all_measures();
    println!();
    println!("  {} measures", measures.len());
    for measure in measures {
        println!(
            "      {} n={} facs={}",
            measure.id.unwrap_or_default().cyan(),
            measure.n.unwrap_or_default(),
            measure.facs.join(" ")
        );
    }

    Ok(())
}

fn summary(store: &mut DocumentStore) -> serde_json::Value {
    let pages: Vec<_> = (0..store.page_count())
        .map(|index| {
            store.set_current_page(index);
            serde_json::json!({
                "page": store.current_page(),
                "zones": store.zones_on_current_page(),
            })
        })
        .collect();

    serde_json::json!({
        "pages": pages,
        "measures": store.all_measures(),
    })
}
