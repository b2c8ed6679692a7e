//! Pickup / delivery scheduling: calendar generation and time slots.
//!
//! All functions are pure over an explicit `today` so the calendar math is
//! testable without touching the clock.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

/// How far ahead a date may be booked, inclusive of today.
pub const BOOKING_WINDOW_DAYS: i64 = 30;

/// The calendar always renders 6 weeks of 7 days.
pub const GRID_CELLS: usize = 42;

/// Weekday header labels, Sunday first.
pub const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// One cell of the 6x7 calendar grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    /// Day of month (of whichever month the cell belongs to).
    pub day: u32,
    /// The full date behind the cell.
    pub date: NaiveDate,
    /// Whether the cell belongs to the displayed month (filler cells from
    /// adjacent months render dimmed and are never selectable).
    pub in_month: bool,
    /// Whether the date may be selected.
    pub available: bool,
    /// Whether the cell is today (only set on in-month cells).
    pub is_today: bool,
}

/// A rendered month: grid plus navigation state for the template.
#[derive(Debug, Clone)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// e.g. "August 2026"
    pub title: String,
    pub cells: Vec<CalendarCell>,
    /// Navigation to months before today's month is not offered.
    pub can_go_back: bool,
    pub prev_year: i32,
    pub prev_month: u32,
    pub next_year: i32,
    pub next_month: u32,
}

/// A selectable time slot with its 12-hour display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: NaiveTime,
    /// `HH:MM` form value, e.g. "13:00".
    pub value: String,
    /// 12-hour label, e.g. "1:00 PM".
    pub label: String,
}

/// Whether `date` may be chosen: within [today, today + booking window].
#[must_use]
pub fn is_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && date <= today + Duration::days(BOOKING_WINDOW_DAYS)
}

/// Generate the 42-cell grid for a month, Sunday-first.
///
/// Leading cells are the previous month's trailing days, then the month's
/// days, then the next month's leading days to fill the grid. Only in-month
/// cells within the booking window are available.
///
/// Returns `None` for an invalid year/month combination.
#[must_use]
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Option<Vec<CalendarCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading = i64::from(first.weekday().num_days_from_sunday());
    let grid_start = first - Duration::days(leading);

    let cells = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            let in_month = date.year() == year && date.month() == month;
            CalendarCell {
                day: date.day(),
                date,
                in_month,
                available: in_month && is_selectable(date, today),
                is_today: in_month && date == today,
            }
        })
        .collect();

    Some(cells)
}

/// Build the full month view with title and navigation state.
///
/// Returns `None` for an invalid year/month combination.
#[must_use]
pub fn month_view(year: i32, month: u32, today: NaiveDate) -> Option<MonthView> {
    let cells = month_grid(year, month, today)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let can_go_back =
        year > today.year() || (year == today.year() && month > today.month());

    Some(MonthView {
        year,
        month,
        title: first.format("%B %Y").to_string(),
        cells,
        can_go_back,
        prev_year,
        prev_month,
        next_year,
        next_month,
    })
}

/// The 11 hourly slots from 10:00 through 20:00.
#[must_use]
pub fn time_slots() -> Vec<TimeSlot> {
    (10..=20)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .map(|time| TimeSlot {
            time,
            value: time.format("%H:%M").to_string(),
            label: slot_label(time),
        })
        .collect()
}

/// Whether `time` is one of the offered slots.
#[must_use]
pub fn is_valid_slot(time: NaiveTime) -> bool {
    time_slots().iter().any(|slot| slot.time == time)
}

/// 12-hour label for a slot, e.g. "10:00 AM", "12:00 PM", "1:00 PM".
#[must_use]
pub fn slot_label(time: NaiveTime) -> String {
    let hour = time.hour();
    match hour {
        0 => format!("12:{:02} AM", time.minute()),
        1..=11 => format!("{}:{:02} AM", hour, time.minute()),
        12 => format!("12:{:02} PM", time.minute()),
        _ => format!("{}:{:02} PM", hour - 12, time.minute()),
    }
}

/// Long-form date label, e.g. "Monday, Aug 10".
#[must_use]
pub fn date_label(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}
