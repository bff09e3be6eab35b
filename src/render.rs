//! Terminal rendering for evcal types.
//!
//! Colors come from owo_colors; layout is plain fixed-width text.

use chrono::{Datelike, NaiveDate};
use evcal_core::grid::{CalendarCell, WEEKDAY_HEADERS, month_title};
use evcal_core::storage::Storage;
use evcal_core::{Event, EventStore};
use owo_colors::OwoColorize;

/// Width of one day column in the month grid.
const CELL_WIDTH: usize = 4;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = format!("{}-{}", self.start_time, self.end_time);
        format!(
            "{} {} {} {}",
            self.start_date.bold(),
            time,
            self.name,
            format!("({})", self.id.short()).dimmed()
        )
    }
}

impl Render for CalendarCell {
    fn render(&self) -> String {
        let day = format!("{:>3}", self.date.day());

        if self.is_today {
            day.reversed().bold().to_string()
        } else if !self.is_current_month {
            day.dimmed().to_string()
        } else {
            day
        }
    }
}

/// Month title, weekday headers and one line per week.
///
/// Days with at least one event get a marker after the day number.
pub fn render_month<S: Storage>(
    shown: NaiveDate,
    cells: &[CalendarCell],
    store: &EventStore<S>,
) -> String {
    let width = CELL_WIDTH * 7;
    let mut lines = Vec::new();

    let title = format!("{:^width$}", month_title(shown), width = width);
    lines.push(title.bold().to_string());

    let headers: String = WEEKDAY_HEADERS
        .iter()
        .map(|h| format!("{:>3} ", h))
        .collect();
    lines.push(headers.dimmed().to_string());

    for week in cells.chunks(7) {
        let line: String = week
            .iter()
            .map(|cell| {
                let marker = if store.events_on(cell.date).is_empty() {
                    " ".to_string()
                } else {
                    "•".cyan().to_string()
                };
                format!("{}{}", cell.render(), marker)
            })
            .collect();
        lines.push(line);
    }

    lines.join("\n")
}

const TABLE_HEADERS: [&str; 6] = ["ID", "Name", "Date", "Start", "End", "Description"];

/// Event list as an aligned table with a header row.
pub fn render_event_table(events: &[&Event]) -> String {
    let rows: Vec<[String; 6]> = events
        .iter()
        .map(|e| {
            [
                e.id.short().to_string(),
                e.name.clone(),
                e.start_date.clone(),
                e.start_time.clone(),
                e.end_time.clone(),
                e.description.clone(),
            ]
        })
        .collect();

    let widths = column_widths(&rows);
    let mut lines = Vec::with_capacity(rows.len() + 1);

    let header = TABLE_HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, w))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(header.trim_end().bold().to_string());

    for row in &rows {
        let id = pad(&row[0], widths[0]).dimmed().to_string();
        let rest = row[1..]
            .iter()
            .zip(&widths[1..])
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(format!("{}  {}", id, rest.trim_end()));
    }

    lines.join("\n")
}

fn column_widths(rows: &[[String; 6]]) -> [usize; 6] {
    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evcal_core::EventId;
    use evcal_core::grid::build_grid;
    use evcal_core::storage::MemoryStorage;

    fn event(name: &str, description: &str) -> Event {
        Event {
            id: EventId::from("0f8fad5b-d9cb-469f-a165-70867728950e"),
            name: name.to_string(),
            start_date: "2024-06-03".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:15".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_column_widths() {
        let rows = vec![[
            "0f8fad5b".to_string(),
            "Quarterly planning".to_string(),
            "2024-06-03".to_string(),
            "09:00".to_string(),
            "09:15".to_string(),
            String::new(),
        ]];
        assert_eq!(column_widths(&rows), [8, 18, 10, 5, 5, 11]);
    }

    #[test]
    fn test_event_table_rows() {
        let standup = event("Standup", "daily");
        let table = render_event_table(&[&standup]);

        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Description"));
        assert!(lines[1].contains("0f8fad5b"));
        assert!(lines[1].contains("Standup"));
        assert!(lines[1].contains("daily"));
    }

    #[test]
    fn test_month_has_line_per_week() {
        let store = EventStore::open(MemoryStorage::new());
        let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let cells = build_grid(june, june);

        let rendered = render_month(june, &cells, &store);
        assert_eq!(rendered.lines().count(), 2 + cells.len() / 7);
        assert!(rendered.contains("June 2024"));
    }

    #[test]
    fn test_event_line() {
        let line = event("Standup", "").render();
        assert!(line.contains("09:00-09:15"));
        assert!(line.contains("Standup"));
    }
}
