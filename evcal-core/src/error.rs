//! Error types for evcal.

use std::fmt;

use thiserror::Error;

use crate::event::EventId;

/// Errors from the storage and configuration layers.
#[derive(Error, Debug)]
pub enum EvcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for evcal operations.
pub type EvcalResult<T> = Result<T, EvcalError>;

/// A required event field, as named on the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    StartDate,
    StartTime,
    EndTime,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::StartDate => "start date",
            Field::StartTime => "start time",
            Field::EndTime => "end time",
        };
        write!(f, "{}", label)
    }
}

/// Reasons a draft cannot be committed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields (missing: {})", join_fields(.0))]
    MissingField(Vec<Field>),

    #[error("Event time conflicts with another event on {start_date} at {start_time}")]
    OverlapConflict {
        start_date: String,
        start_time: String,
    },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors returned by `EventStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Could not persist events: {0}")]
    Storage(#[from] EvcalError),
}
