//! Calendar-unit durations for visible ranges and paging.

use serde::{Deserialize, Serialize};

/// A duration expressed in calendar units.
///
/// Fields are independent: `{months: 1, days: 3}` means one month and three
/// days, applied largest unit first. Negative fields move backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateDuration {
    pub years: i32,
    pub months: i32,
    pub weeks: i32,
    pub days: i32,
}

impl DateDuration {
    pub const fn new(years: i32, months: i32, weeks: i32, days: i32) -> Self {
        Self {
            years,
            months,
            weeks,
            days,
        }
    }

    pub const fn years(years: i32) -> Self {
        Self::new(years, 0, 0, 0)
    }

    pub const fn months(months: i32) -> Self {
        Self::new(0, months, 0, 0)
    }

    pub const fn weeks(weeks: i32) -> Self {
        Self::new(0, 0, weeks, 0)
    }

    pub const fn days(days: i32) -> Self {
        Self::new(0, 0, 0, days)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// The duration pointing the other way.
    pub fn negated(self) -> Self {
        Self {
            years: self.years.saturating_neg(),
            months: self.months.saturating_neg(),
            weeks: self.weeks.saturating_neg(),
            days: self.days.saturating_neg(),
        }
    }

    /// One of each unit this duration uses. A six month duration pages by
    /// single months under single-unit paging.
    pub(crate) fn unit(self) -> Self {
        Self {
            years: i32::from(self.years != 0),
            months: i32::from(self.months != 0),
            weeks: i32::from(self.weeks != 0),
            days: i32::from(self.days != 0),
        }
    }

    /// Offset from a range start to its inclusive end: the duration shortened
    /// by one day.
    pub(crate) fn end_offset(self) -> Self {
        let mut d = self;
        d.days = d.days.saturating_sub(1);
        d
    }
}
