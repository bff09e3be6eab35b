use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use evcal_core::grid::{Direction, build_grid, navigate};
use evcal_core::storage::Storage;
use evcal_core::{Event, EventStore};
use owo_colors::OwoColorize;

use crate::render::{Render, render_month};

pub fn run<S: Storage>(
    store: &EventStore<S>,
    month: Option<&str>,
    prev: Option<u32>,
    next: Option<u32>,
) -> Result<()> {
    let today = Local::now().date_naive();

    // The cursor sits on the 1st so stepping never overflows into a later month
    let start = match month {
        Some(s) => parse_month(s)?,
        None => today.with_day(1).unwrap_or(today),
    };
    let shown = shift(start, prev, next)?;

    let cells = build_grid(shown, today);
    println!("{}", render_month(shown, &cells, store));

    let agenda = events_in_month(store, shown);
    println!();
    if agenda.is_empty() {
        println!("  {}", "No events this month".dimmed());
    }
    for event in agenda {
        println!("  {}", event.render());
    }

    Ok(())
}

/// Parse a `YYYY-MM` month argument into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", s))
}

/// Step `prev` months back or `next` months forward from `start`.
fn shift(start: NaiveDate, prev: Option<u32>, next: Option<u32>) -> Result<NaiveDate> {
    let (direction, steps) = match (prev, next) {
        (Some(n), _) => (Direction::Previous, n),
        (None, Some(n)) => (Direction::Next, n),
        (None, None) => return Ok(start),
    };

    (0..steps).try_fold(start, |date, _| {
        navigate(date, direction).context("Month is out of range")
    })
}

/// Events dated in the month of `shown`, ordered by date then start time.
fn events_in_month<S: Storage>(store: &EventStore<S>, shown: NaiveDate) -> Vec<&Event> {
    let mut events: Vec<&Event> = store
        .events()
        .iter()
        .filter(|e| {
            e.date()
                .is_some_and(|d| d.year() == shown.year() && d.month() == shown.month())
        })
        .collect();

    events.sort_by(|a, b| (a.date(), &a.start_time).cmp(&(b.date(), &b.start_time)));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use evcal_core::storage::MemoryStorage;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-06").unwrap(), ymd(2024, 6, 1));
        assert_eq!(parse_month(" 1999-12 ").unwrap(), ymd(1999, 12, 1));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("June").is_err());
    }

    #[test]
    fn test_shift() {
        let start = ymd(2024, 1, 1);
        assert_eq!(shift(start, None, None).unwrap(), start);
        assert_eq!(shift(start, None, Some(13)).unwrap(), ymd(2025, 2, 1));
        assert_eq!(shift(start, Some(1), None).unwrap(), ymd(2023, 12, 1));
        assert_eq!(shift(start, Some(0), None).unwrap(), start);
    }

    #[test]
    fn test_events_in_month_sorted() {
        let raw = r#"[
            {"name":"Late","startDate":"2024-06-20","startTime":"09:00","endTime":"10:00"},
            {"name":"July","startDate":"2024-07-01","startTime":"09:00","endTime":"10:00"},
            {"name":"Afternoon","startDate":"2024-06-03","startTime":"14:00","endTime":"15:00"},
            {"name":"Morning","startDate":"2024-06-03","startTime":"08:00","endTime":"09:00"},
            {"name":"Undated","startDate":"someday","startTime":"08:00","endTime":"09:00"}
        ]"#;
        let store = EventStore::open(MemoryStorage::with_entry("events", raw));

        let names: Vec<_> = events_in_month(&store, ymd(2024, 6, 1))
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Morning", "Afternoon", "Late"]);
    }
}
