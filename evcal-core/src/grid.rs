//! Month grid layout.
//!
//! A grid always covers whole Sunday-first weeks: it starts on the Sunday on
//! or before the 1st of the month and runs past the last day of the month
//! until the final week is complete.

use chrono::{Datelike, Days, Local, Months, NaiveDate};

/// Weekday column headers, Sunday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// One day in the rendered month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// The date falls in the displayed month (not a leading/trailing day).
    pub is_current_month: bool,
    pub is_today: bool,
}

/// Month navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Lay out the grid for the month containing `reference`, marking `today`.
pub fn build_grid(reference: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    let first = first_of_month(reference);
    let last = last_of_month(first);
    let lead = Days::new(u64::from(first.weekday().num_days_from_sunday()));
    let start = first.checked_sub_days(lead).unwrap_or(first);

    let mut cells = Vec::with_capacity(42);
    let mut date = start;

    while date <= last || cells.len() % 7 != 0 {
        cells.push(CalendarCell {
            date,
            is_current_month: date.year() == first.year() && date.month() == first.month(),
            is_today: date == today,
        });

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    cells
}

/// Same as [`build_grid`], with today's date taken from the local clock.
pub fn build_grid_for_today(reference: NaiveDate) -> Vec<CalendarCell> {
    build_grid(reference, Local::now().date_naive())
}

/// Move to the same day-of-month in the adjacent month.
///
/// A day that does not exist in the target month overflows into the month
/// after it: Jan 31 moved forward is "Feb 31", i.e. Mar 3 (Mar 2 in a leap
/// year). Returns `None` only outside chrono's representable range.
pub fn navigate(current: NaiveDate, direction: Direction) -> Option<NaiveDate> {
    let first = first_of_month(current);
    let target = match direction {
        Direction::Previous => first.checked_sub_months(Months::new(1))?,
        Direction::Next => first.checked_add_months(Months::new(1))?,
    };
    target.checked_add_days(Days::new(u64::from(current.day0())))
}

/// Header for the displayed month, e.g. "June 2024".
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
