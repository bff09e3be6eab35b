//! iCalendar export of the event list.

use chrono::NaiveDateTime;
use icalendar::{Calendar, Component};

use crate::event::Event;

/// Render all events as a single VCALENDAR.
///
/// Times are written as floating local times. Events whose date or times do
/// not parse are still exported, just without DTSTART/DTEND.
pub fn export_ics(events: &[Event]) -> String {
    let mut cal = Calendar::new();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(event.id.as_str());
        ics_event.summary(&event.name);

        if !event.description.is_empty() {
            ics_event.description(&event.description);
        }

        if let Some(start) = event.start() {
            ics_event.add_property("DTSTART", format_floating(start));
        }

        if let Some(end) = event.end() {
            ics_event.add_property("DTEND", format_floating(end));
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    cal.to_string()
}

fn format_floating(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}
