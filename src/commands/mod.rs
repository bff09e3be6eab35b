pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod month;

use anyhow::Result;
use clap::Args;
use evcal_core::storage::Storage;
use evcal_core::{Draft, EventId, EventStore};

/// Event form fields as command-line options.
#[derive(Args, Debug, Default)]
pub struct EventFields {
    /// Event name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,
}

impl EventFields {
    /// Overwrite the draft fields that were given on the command line.
    pub fn apply_to(self, draft: &mut Draft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(date) = self.date {
            draft.start_date = date;
        }
        if let Some(start) = self.start {
            draft.start_time = start;
        }
        if let Some(end) = self.end {
            draft.end_time = end;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.description.is_none()
    }
}

/// Resolve a full id or unique id prefix to an event id.
pub fn resolve_id<S: Storage>(store: &EventStore<S>, prefix: &str) -> Result<EventId> {
    if prefix.trim().is_empty() {
        anyhow::bail!("Event id must not be empty");
    }

    match store.find_by_prefix(prefix).as_slice() {
        [] => anyhow::bail!("No event with id '{}'", prefix),
        [event] => Ok(event.id.clone()),
        matches => anyhow::bail!(
            "Id '{}' is ambiguous ({} events match), use a longer prefix",
            prefix,
            matches.len()
        ),
    }
}
