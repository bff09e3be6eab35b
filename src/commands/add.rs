use anyhow::Result;
use evcal_core::EventStore;
use evcal_core::storage::Storage;
use owo_colors::OwoColorize;

use super::EventFields;

pub fn run<S: Storage>(store: &mut EventStore<S>, fields: EventFields) -> Result<()> {
    let mut draft = store.begin_create(None);
    fields.apply_to(&mut draft);

    let id = store.commit(draft)?;

    if let Some(event) = store.get(&id) {
        println!(
            "{} {}",
            format!("  Created: {}", event.name).green(),
            format!("({})", id.short()).dimmed()
        );
    }

    Ok(())
}
