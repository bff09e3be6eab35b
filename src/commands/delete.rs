use anyhow::Result;
use evcal_core::EventStore;
use evcal_core::storage::Storage;
use owo_colors::OwoColorize;

use super::resolve_id;

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &str) -> Result<()> {
    let id = resolve_id(store, id)?;
    let removed = store.remove(&id)?;

    println!("{}", format!("  Deleted: {}", removed.name).red());

    Ok(())
}
