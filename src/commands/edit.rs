use anyhow::Result;
use evcal_core::EventStore;
use evcal_core::storage::Storage;
use owo_colors::OwoColorize;

use super::{EventFields, resolve_id};

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &str, fields: EventFields) -> Result<()> {
    if fields.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --name, --date, --start, --end, --description");
    }

    let id = resolve_id(store, id)?;
    let mut draft = store.begin_edit(&id)?;
    fields.apply_to(&mut draft);

    if let Err(e) = store.commit(draft) {
        store.cancel();
        return Err(e.into());
    }

    if let Some(event) = store.get(&id) {
        println!("{}", format!("  Updated: {}", event.name).yellow());
    }

    Ok(())
}
