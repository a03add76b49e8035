use crate::commands::{open_store, write_output};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use facsimile_editor::Mutation;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// MEI file to edit
    pub file: PathBuf,

    /// JSON array of mutations to replay
    #[arg(short, long)]
    pub mutations: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn apply(args: ApplyArgs, config: &Config) -> Result<()> {
    let mut store = open_store(&args.file, config)?;

    let content = fs::read_to_string(&args.mutations)
        .with_context(|| format!("Cannot read {}", args.mutations.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mutations in {}", args.mutations.display()))?;

    let total = mutations.len();
    for (i, mutation) in mutations.into_iter().enumerate() {
        store
            .apply(mutation)
            .with_context(|| format!("Mutation {} of {} failed", i + 1, total))?;
    }
    info!(total, version = store.version(), "Applied mutations");
    eprintln!("{} Applied {} mutations", "✓".green(), total);

    write_output(&store, args.out.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_mutations_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("score.mei");
        let edits = dir.path().join("edits.json");
        let out = dir.path().join("out.mei");

        fs::write(
            &file,
            r#"<mei><music><facsimile><surface><graphic target="p1.jpg" width="10"/></surface></facsimile></music></mei>"#,
        )
        .unwrap();
        fs::write(
            &edits,
            r#"[
                { "type": "toggleMultiZone" },
                { "type": "createZone", "annotation": {
                    "id": "z1", "bounds": { "x": 0, "y": 0, "w": 5, "h": 5 }, "pageUri": "p1.jpg" } },
                { "type": "createZone", "annotation": {
                    "id": "z2", "bounds": { "x": 5, "y": 0, "w": 5, "h": 5 }, "pageUri": "p1.jpg" } }
            ]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                file,
                mutations: edits,
                out: Some(out.clone()),
            },
            &Config::default(),
        )
        .unwrap();

        let written = fs::read_to_string(out).unwrap();
        assert!(written.contains(r##"facs="#z1 #z2""##));
    }

    #[test]
    fn test_apply_reports_failing_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("score.mei");
        let edits = dir.path().join("edits.json");

        fs::write(
            &file,
            r#"<mei><music><facsimile><surface><graphic target="p" width="1"/></surface></facsimile></music></mei>"#,
        )
        .unwrap();
        fs::write(
            &edits,
            r#"[{ "type": "updateZone", "annotation": {
                "id": "missing", "bounds": { "x": 0, "y": 0, "w": 5, "h": 5 }, "pageUri": "p" } }]"#,
        )
        .unwrap();

        let err = apply(
            ApplyArgs {
                file,
                mutations: edits,
                out: None,
            },
            &Config::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Mutation 1 of 1"));
    }
}
