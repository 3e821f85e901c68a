//! Visible-range alignment.
//!
//! A visible range is anchored by aligning its start to the largest unit of
//! the visible duration: year durations snap to the start of the year, month
//! durations to the start of the month, week durations to the start of the
//! week. The constrain step then keeps the window from drifting past the
//! minimum and maximum bounds when the anchor date sits inside them.

use chrono::Weekday;

use crate::models::date::CalendarDate;
use crate::models::duration::DateDuration;
use crate::utils::date::{start_of_month, start_of_week, start_of_year};

/// Start of the window whose first unit contains `date`.
pub(crate) fn align_start(
    date: CalendarDate,
    duration: DateDuration,
    first_day: Weekday,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> CalendarDate {
    let aligned = if duration.years != 0 {
        start_of_year(&date)
    } else if duration.months != 0 {
        start_of_month(&date)
    } else if duration.weeks != 0 {
        start_of_week(&date, first_day)
    } else {
        date
    };
    constrain_start(date, aligned, duration, first_day, min, max)
}

/// Start of the window with `date`'s unit in the middle.
pub(crate) fn align_center(
    date: CalendarDate,
    duration: DateDuration,
    first_day: Weekday,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> CalendarDate {
    let aligned =
        align_start(date, duration, first_day, None, None).subtract(half_duration(duration));
    constrain_start(date, aligned, duration, first_day, min, max)
}

/// Start of the window whose last unit contains `date`.
pub(crate) fn align_end(
    date: CalendarDate,
    duration: DateDuration,
    first_day: Weekday,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> CalendarDate {
    let back = decrement_smallest(duration);
    let aligned = align_start(date.subtract(back), duration, first_day, None, None);
    constrain_start(date, aligned, duration, first_day, min, max)
}

/// Keep an aligned window start inside the bounds, but only when the anchor
/// date itself is inside them. The window never starts before the window
/// containing the minimum, and never starts after the window ending at the
/// maximum.
pub(crate) fn constrain_start(
    date: CalendarDate,
    mut aligned: CalendarDate,
    duration: DateDuration,
    first_day: Weekday,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> CalendarDate {
    if let Some(min) = min {
        if date >= min {
            let floor = align_start(min.to_calendar(aligned.kind()), duration, first_day, None, None);
            aligned = aligned.max(floor);
        }
    }
    if let Some(max) = max {
        if date <= max {
            let ceiling = align_end(max.to_calendar(aligned.kind()), duration, first_day, None, None);
            aligned = aligned.min(ceiling);
        }
    }
    aligned
}

/// Clamp a date into the closed interval formed by the bounds.
pub(crate) fn constrain_value(
    mut date: CalendarDate,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> CalendarDate {
    if let Some(min) = min {
        date = date.max(min.to_calendar(date.kind()));
    }
    if let Some(max) = max {
        date = date.min(max.to_calendar(date.kind()));
    }
    date
}

/// Whether a date falls outside the bounds.
pub(crate) fn out_of_bounds(
    date: CalendarDate,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> bool {
    min.is_some_and(|min| date < min) || max.is_some_and(|max| date > max)
}

// Offset from a centered window's start to its anchor unit: half the
// duration rounded down, with even spans shifted one unit earlier so the
// anchor lands just past the middle.
fn half_duration(duration: DateDuration) -> DateDuration {
    fn half(n: i32) -> i32 {
        let mut h = n / 2;
        if h > 0 && n % 2 == 0 {
            h -= 1;
        }
        h
    }
    DateDuration {
        years: half(duration.years),
        months: half(duration.months),
        weeks: half(duration.weeks),
        days: half(duration.days),
    }
}

// The duration shortened by one of its smallest unit, used to step back to
// the first unit of an end-aligned window.
fn decrement_smallest(duration: DateDuration) -> DateDuration {
    let mut d = duration;
    if d.days != 0 {
        d.days -= 1;
    } else if d.weeks != 0 {
        d.weeks -= 1;
    } else if d.months != 0 {
        d.months -= 1;
    } else if d.years != 0 {
        d.years -= 1;
    }
    d
}
