//! Event records and the draft used to create or edit them.
//!
//! Dates and times are kept in the textual form they were entered in
//! (`YYYY-MM-DD`, `HH:MM`) and are only parsed when a caller needs a
//! `chrono` value, e.g. to place an event on the month grid.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Field;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Stable identifier of an event, assigned when the event is first committed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        EventId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder for records stored without an id; `load` replaces it.
    pub(crate) fn unassigned() -> Self {
        EventId(String::new())
    }

    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }

    /// First eight characters, enough to tell events apart in a listing.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduled event.
///
/// Serialized with the field names of the stored layout:
/// `{id, name, startDate, startTime, endTime, description}`. Records written
/// without an id read back with an unassigned one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default = "EventId::unassigned")]
    pub id: EventId,
    pub name: String,
    pub start_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
}

impl Event {
    /// The start date, if it is a valid `YYYY-MM-DD` date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.start_date.trim(), DATE_FORMAT).ok()
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        Some(self.date()?.and_time(parse_time(&self.start_time)?))
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        Some(self.date()?.and_time(parse_time(&self.end_time)?))
    }

    /// Whether this event starts at exactly this date and time.
    pub fn same_slot(&self, start_date: &str, start_time: &str) -> bool {
        self.start_date == start_date && self.start_time == start_time
    }

    pub fn matches_name(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`, the two shapes a time input produces.
fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// The contents of the event form while it is being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub start_date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

impl Draft {
    /// Blank draft, with the start date taken from the selected grid cell.
    pub fn blank(prefill_date: Option<NaiveDate>) -> Self {
        Draft {
            start_date: prefill_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Required fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<Field> {
        [
            (Field::Name, &self.name),
            (Field::StartDate, &self.start_date),
            (Field::StartTime, &self.start_time),
            (Field::EndTime, &self.end_time),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            start_date: self.start_date,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description,
        }
    }
}

impl From<&Event> for Draft {
    fn from(event: &Event) -> Self {
        Draft {
            name: event.name.clone(),
            start_date: event.start_date.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            description: event.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standup() -> Event {
        Event {
            id: EventId::from("0f8fad5b-d9cb-469f-a165-70867728950e"),
            name: "Standup".to_string(),
            start_date: "2024-06-03".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:15".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_short_id() {
        assert_eq!(standup().id.short(), "0f8fad5b");
        assert_eq!(EventId::from("abc").short(), "abc");
    }

    #[test]
    fn test_parses_date_and_times() {
        let event = standup();
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 6, 3));
        assert_eq!(
            event.start(),
            NaiveDate::from_ymd_opt(2024, 6, 3).and_then(|d| d.and_hms_opt(9, 0, 0))
        );
        assert_eq!(
            event.end(),
            NaiveDate::from_ymd_opt(2024, 6, 3).and_then(|d| d.and_hms_opt(9, 15, 0))
        );
    }

    #[test]
    fn test_unparseable_date_is_none() {
        let mut event = standup();
        event.start_date = "next tuesday".to_string();
        assert_eq!(event.date(), None);
        assert_eq!(event.start(), None);
    }

    #[test]
    fn test_blank_draft_prefills_date() {
        let draft = Draft::blank(NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(draft.start_date, "2024-02-29");
        assert!(draft.name.is_empty());

        assert_eq!(Draft::blank(None).start_date, "");
    }

    #[test]
    fn test_missing_fields() {
        let draft = Draft {
            name: "  ".to_string(),
            start_date: "2024-06-03".to_string(),
            end_time: "10:00".to_string(),
            ..Default::default()
        };
        assert_eq!(
            draft.missing_fields(),
            vec![Field::Name, Field::StartTime]
        );
        assert!(Draft::from(&standup()).missing_fields().is_empty());
    }

    #[test]
    fn test_record_without_id_is_unassigned() {
        let json = r#"{"name":"Standup","startDate":"2024-06-03","startTime":"09:00","endTime":"09:15","description":""}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.name, "Standup");
        assert!(event.id.is_unassigned());
        assert!(!EventId::new().is_unassigned());
    }

    #[test]
    fn test_serializes_stored_layout() {
        let value = serde_json::to_value(standup()).unwrap();
        assert_eq!(value["startDate"], "2024-06-03");
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["endTime"], "09:15");
        assert_eq!(value["id"], "0f8fad5b-d9cb-469f-a165-70867728950e");
    }
}
