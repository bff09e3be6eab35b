use std::path::Path;

use anyhow::{Context, Result};
use evcal_core::EventStore;
use evcal_core::ics::export_ics;
use evcal_core::storage::Storage;
use owo_colors::OwoColorize;

pub fn run<S: Storage>(store: &EventStore<S>, output: Option<&Path>) -> Result<()> {
    let content = export_ics(store.events());

    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{}",
                format!("  Exported {} events to {}", store.len(), path.display()).green()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}
