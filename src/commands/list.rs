use anyhow::Result;
use evcal_core::EventStore;
use evcal_core::storage::Storage;
use owo_colors::OwoColorize;

use crate::render::render_event_table;

pub fn run<S: Storage>(store: &mut EventStore<S>, search: Option<String>) -> Result<()> {
    store.set_search_term(search.unwrap_or_default());

    let events = store.filtered();
    if events.is_empty() {
        println!("{}", "No events found.".dimmed());
        return Ok(());
    }

    println!("{}", render_event_table(&events));

    Ok(())
}
