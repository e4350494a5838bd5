//! The `studycoach validate` command.

use std::path::PathBuf;

use anyhow::Result;

use studycoach_core::catalog::{load_content_pack, validate_catalog};

pub fn execute(content_pack: PathBuf) -> Result<()> {
    let catalog = load_content_pack(&content_pack)?;

    println!(
        "Content pack: {} ({} questions, {} misconceptions)",
        catalog.topic(),
        catalog.questions().len(),
        catalog.misconceptions().len()
    );

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = w
            .entry_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Content pack valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
