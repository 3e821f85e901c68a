//! Inclusive date range shown by the calendar.

use crate::models::date::CalendarDate;

/// The inclusive range of days a calendar currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl VisibleRange {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// Whether the day falls inside the range. Comparison is on the
    /// canonical day, so the date's calendar system does not matter.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        *date >= self.start && *date <= self.end
    }
}
