//! Core library for evcal.
//!
//! - `grid` lays out month views and moves between months
//! - `store` holds the event list with its create/edit/delete/search operations
//! - `storage` is the key-value persistence port the store writes through

pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod ics;
pub mod storage;
pub mod store;

pub use error::{EvcalError, EvcalResult, Field, StoreError, ValidationError};
pub use event::{Draft, Event, EventId};
pub use grid::{CalendarCell, Direction};
pub use store::{EditMode, EventStore};
