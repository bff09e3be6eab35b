//! The event list and its edit/search state.
//!
//! `EventStore` keeps the whole list in memory and writes all of it back to
//! its [`Storage`] after every successful mutation. Mutations are atomic: the
//! new list is persisted first and only then replaces the in-memory one, so a
//! failed write leaves the store exactly as it was.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{EvcalError, EvcalResult, StoreError, ValidationError};
use crate::event::{Draft, Event, EventId};
use crate::storage::{DEFAULT_STORAGE_KEY, Storage};

/// What a commit will do with the current draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Append a new event.
    #[default]
    Create,
    /// Overwrite the event with this id.
    Edit(EventId),
}

pub struct EventStore<S> {
    storage: S,
    key: String,
    events: Vec<Event>,
    search_term: String,
    edit_mode: EditMode,
}

impl<S: Storage> EventStore<S> {
    /// Open the store on the default storage entry.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Records that were missing an id, or shared one, are written back once
    /// with their new ids so the ids stay the same on the next open.
    pub fn open_with_key(mut storage: S, key: &str) -> Self {
        let Loaded { events, assigned } = load_assigning_ids(&storage, key);

        if assigned > 0 {
            match save(&mut storage, key, &events) {
                Ok(()) => tracing::debug!(key, assigned, "saved newly assigned event ids"),
                Err(e) => tracing::warn!(key, error = %e, "could not save newly assigned event ids"),
            }
        }

        EventStore {
            storage,
            key: key.to_string(),
            events,
            search_term: String::new(),
            edit_mode: EditMode::Create,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Events whose id starts with `prefix`.
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.id.as_str().starts_with(prefix))
            .collect()
    }

    pub fn edit_mode(&self) -> &EditMode {
        &self.edit_mode
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // FORM:

    /// Start a new event, optionally on the date selected in the grid.
    pub fn begin_create(&mut self, prefill_date: Option<NaiveDate>) -> Draft {
        self.edit_mode = EditMode::Create;
        Draft::blank(prefill_date)
    }

    /// Start editing an existing event; the returned draft is a copy of it.
    pub fn begin_edit(&mut self, id: &EventId) -> Result<Draft, StoreError> {
        let event = self
            .get(id)
            .ok_or_else(|| StoreError::EventNotFound(id.clone()))?;
        let draft = Draft::from(event);

        self.edit_mode = EditMode::Edit(id.clone());
        Ok(draft)
    }

    /// Abandon the current draft.
    pub fn cancel(&mut self) {
        self.edit_mode = EditMode::Create;
    }

    /// Validate the draft and apply it according to the current edit mode.
    ///
    /// Returns the id of the created or updated event. On any error the
    /// store, including its edit mode, is unchanged.
    pub fn commit(&mut self, draft: Draft) -> Result<EventId, StoreError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingField(missing).into());
        }

        let editing = match &self.edit_mode {
            EditMode::Create => None,
            EditMode::Edit(id) => Some(id),
        };

        let conflict = self
            .events
            .iter()
            .filter(|e| Some(&e.id) != editing)
            .any(|e| e.same_slot(&draft.start_date, &draft.start_time));

        if conflict {
            return Err(ValidationError::OverlapConflict {
                start_date: draft.start_date,
                start_time: draft.start_time,
            }
            .into());
        }

        let mut updated = self.events.clone();
        let id = match editing {
            None => {
                let id = EventId::new();
                updated.push(draft.into_event(id.clone()));
                id
            }
            Some(id) => {
                let slot = updated
                    .iter_mut()
                    .find(|e| &e.id == id)
                    .ok_or_else(|| StoreError::EventNotFound(id.clone()))?;
                *slot = draft.into_event(id.clone());
                id.clone()
            }
        };

        self.persist(updated)?;
        self.edit_mode = EditMode::Create;

        tracing::debug!(%id, count = self.events.len(), "committed event");
        Ok(id)
    }

    /// Delete an event. Later events move up one position.
    pub fn remove(&mut self, id: &EventId) -> Result<Event, StoreError> {
        let index = self
            .events
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| StoreError::EventNotFound(id.clone()))?;

        let mut updated = self.events.clone();
        let removed = updated.remove(index);

        self.persist(updated)?;

        if self.edit_mode == EditMode::Edit(id.clone()) {
            self.edit_mode = EditMode::Create;
        }

        tracing::debug!(%id, count = self.events.len(), "removed event");
        Ok(removed)
    }

    // QUERIES:

    /// Events whose name contains `term`, ignoring case. An empty term
    /// matches everything.
    pub fn search(&self, term: &str) -> Vec<&Event> {
        let needle = term.to_lowercase();
        self.events
            .iter()
            .filter(|e| e.matches_name(&needle))
            .collect()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The list as currently filtered by the search term.
    pub fn filtered(&self) -> Vec<&Event> {
        self.search(&self.search_term)
    }

    /// Events starting on `date`, in list order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.date() == Some(date))
            .collect()
    }

    fn persist(&mut self, updated: Vec<Event>) -> EvcalResult<()> {
        save(&mut self.storage, &self.key, &updated)?;
        self.events = updated;
        Ok(())
    }
}

/// Read the event list stored under `key`.
///
/// Missing, unreadable or malformed data all yield an empty list. Every
/// returned event has a unique id.
pub fn load<S: Storage>(storage: &S, key: &str) -> Vec<Event> {
    load_assigning_ids(storage, key).events
}

struct Loaded {
    events: Vec<Event>,
    /// How many events were given a new id while loading.
    assigned: usize,
}

fn load_assigning_ids<S: Storage>(storage: &S, key: &str) -> Loaded {
    let empty = Loaded {
        events: Vec::new(),
        assigned: 0,
    };

    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return empty,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored events, starting empty");
            return empty;
        }
    };

    let mut events: Vec<Event> = match serde_json::from_str(&raw) {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored events");
            return empty;
        }
    };

    // Records without an id, or hand-edited ones repeating an id
    let mut assigned = 0;
    let mut seen = HashSet::new();
    for event in &mut events {
        if event.id.is_unassigned() || !seen.insert(event.id.clone()) {
            if !event.id.is_unassigned() {
                tracing::warn!(id = %event.id, name = %event.name, "duplicate event id, assigning a new one");
            }
            event.id = EventId::new();
            seen.insert(event.id.clone());
            assigned += 1;
        }
    }

    tracing::debug!(key, count = events.len(), assigned, "loaded events");
    Loaded { events, assigned }
}

/// Write the full event list under `key`.
pub fn save<S: Storage>(storage: &mut S, key: &str, events: &[Event]) -> EvcalResult<()> {
    let json =
        serde_json::to_string(events).map_err(|e| EvcalError::Serialization(e.to_string()))?;
    storage.set(key, &json)
}
