//! Rewrite every dataset document with normalized titles, slugs and
//! release attributes.
//!
//! Usage: `filmdex-normalize [DIR]` (default: `dataset.dir` from config).

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use filmdex_core::{normalize_directory, JsonDirStore};
use filmdex_server::bootstrap::{init_tracing, load_runtime_config};

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing();

    let dir = match std::env::args_os().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => load_runtime_config()?.dataset.dir,
    };
    info!("Normalizing datasets in {:?}", dir);

    let store = JsonDirStore::new(dir.clone());
    let report = normalize_directory(&store)
        .with_context(|| format!("Failed to read dataset directory {:?}", dir))?;

    for skipped in &report.skipped {
        warn!(document = %skipped.document, reason = %skipped.reason, "Document skipped");
    }
    info!(
        processed = report.processed.len(),
        skipped = report.skipped.len(),
        records = report.records,
        "Normalization complete"
    );
    Ok(())
}
