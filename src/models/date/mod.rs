//! Calendar-aware date model.
//!
//! A [`CalendarDate`] carries the field view of one calendar system (era,
//! year, month, day) together with its canonical ISO day. Comparison,
//! hashing and day arithmetic all run on the canonical day, so dates from
//! different calendar systems order correctly against each other.

use std::hash::{Hash, Hasher};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::duration::DateDuration;
use crate::services::calendar::{CalendarKind, DateError, Era, ExtendedDate};

/// A date in a specific calendar system.
///
/// Construction validates fields against the calendar's structure and then
/// canonicalizes them, so an era label that does not match the day (for
/// example a Japanese date written in the wrong era) is corrected rather
/// than stored verbatim. Arithmetic never fails: results clamp to month
/// ends and saturate at the representable range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarDate", into = "RawCalendarDate")]
pub struct CalendarDate {
    kind: CalendarKind,
    era: Era,
    year: i32,
    month: u8,
    day: u8,
    extended_year: i32,
    iso: NaiveDate,
}

impl CalendarDate {
    /// Build a date from era-relative fields, validating them.
    pub fn new(
        kind: CalendarKind,
        era: Era,
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<Self, DateError> {
        let system = kind.system();
        let extended_year = system.extended_year(era, year)?;
        Self::from_ymd(kind, extended_year, month, day)
    }

    /// Build a date from a year on the calendar's linear axis.
    pub fn from_ymd(kind: CalendarKind, year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        let system = kind.system();
        let months = system.months_in_year(year);
        if month < 1 || month > months {
            return Err(DateError::InvalidMonth { month, max: months });
        }
        let days = system.days_in_month(year, month);
        if day < 1 || day > days {
            return Err(DateError::InvalidDay {
                day,
                month,
                max: days,
            });
        }
        let iso = system
            .iso_from_extended(ExtendedDate::new(year, month, day))
            .ok_or(DateError::OutOfRange { year })?;
        Ok(Self::from_iso(kind, iso))
    }

    /// Shorthand for a Gregorian date.
    pub fn gregorian(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        Self::from_ymd(CalendarKind::Gregorian, year, month, day)
    }

    /// View an ISO day through the given calendar system.
    pub fn from_iso(kind: CalendarKind, iso: NaiveDate) -> Self {
        let system = kind.system();
        let ext = system.extended_from_iso(iso);
        let (era, year) = system.era_fields(ext);
        Self {
            kind,
            era,
            year,
            month: ext.month,
            day: ext.day,
            extended_year: ext.year,
            iso,
        }
    }

    /// Build from extended fields, clamping out-of-range values instead of
    /// failing. Month and day clamp into the year's structure; years beyond
    /// the representable range saturate to the nearest bound.
    pub(crate) fn from_extended_clamped(kind: CalendarKind, mut ext: ExtendedDate) -> Self {
        let system = kind.system();
        let months = system.months_in_year(ext.year);
        ext.month = ext.month.clamp(1, months);
        let days = system.days_in_month(ext.year, ext.month);
        ext.day = ext.day.clamp(1, days);
        match system.iso_from_extended(ext) {
            Some(iso) => Self::from_iso(kind, iso),
            None => {
                let min = Self::from_iso(kind, NaiveDate::MIN);
                if ext.year <= min.extended_year {
                    min
                } else {
                    Self::from_iso(kind, NaiveDate::MAX)
                }
            }
        }
    }

    pub fn kind(&self) -> CalendarKind {
        self.kind
    }

    pub fn era(&self) -> Era {
        self.era
    }

    /// Era-relative year.
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// The canonical ISO day.
    pub fn iso(&self) -> NaiveDate {
        self.iso
    }

    pub(crate) fn extended(&self) -> ExtendedDate {
        ExtendedDate::new(self.extended_year, self.month, self.day)
    }

    /// Days in this date's month.
    pub fn days_in_month(&self) -> u8 {
        self.kind.system().days_in_month(self.extended_year, self.month)
    }

    /// The same day viewed through another calendar system.
    pub fn to_calendar(self, kind: CalendarKind) -> Self {
        if kind == self.kind {
            self
        } else {
            Self::from_iso(kind, self.iso)
        }
    }

    /// Add a duration.
    ///
    /// Years apply first, then months, each stage clamping the day into the
    /// target month. Weeks and days then move along the canonical axis.
    /// Results saturate at the representable range.
    pub fn add(self, duration: DateDuration) -> Self {
        let system = self.kind.system();
        let mut ext = self.extended();

        if duration.years != 0 {
            ext.year = ext.year.saturating_add(duration.years);
            ext.day = ext.day.min(system.days_in_month(ext.year, ext.month));
        }
        if duration.months != 0 {
            let per_year = i64::from(system.months_in_year(ext.year));
            let total = i64::from(ext.year) * per_year + i64::from(ext.month) - 1
                + i64::from(duration.months);
            let year = total.div_euclid(per_year);
            ext.year = year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            ext.month = total.rem_euclid(per_year) as u8 + 1;
            ext.day = ext.day.min(system.days_in_month(ext.year, ext.month));
        }

        let date = Self::from_extended_clamped(self.kind, ext);

        let day_delta = i64::from(duration.weeks) * 7 + i64::from(duration.days);
        if day_delta == 0 {
            date
        } else {
            Self::from_iso(self.kind, shift_days_saturating(date.iso, day_delta))
        }
    }

    /// Subtract a duration. Equivalent to adding its negation.
    pub fn subtract(self, duration: DateDuration) -> Self {
        self.add(duration.negated())
    }
}

fn shift_days_saturating(iso: NaiveDate, delta: i64) -> NaiveDate {
    if delta >= 0 {
        iso.checked_add_days(Days::new(delta as u64))
            .unwrap_or(NaiveDate::MAX)
    } else {
        iso.checked_sub_days(Days::new(delta.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    }
}

// Identity follows the canonical day only, so dates in different calendar
// systems compare by the absolute day they name.

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.iso == other.iso
    }
}

impl Eq for CalendarDate {}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iso.hash(state);
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iso.cmp(&other.iso)
    }
}

/// Serialized form. Deserialization re-validates through [`CalendarDate::new`].
#[derive(Serialize, Deserialize)]
struct RawCalendarDate {
    calendar: CalendarKind,
    era: Era,
    year: i32,
    month: u8,
    day: u8,
}

impl TryFrom<RawCalendarDate> for CalendarDate {
    type Error = DateError;

    fn try_from(raw: RawCalendarDate) -> Result<Self, DateError> {
        CalendarDate::new(raw.calendar, raw.era, raw.year, raw.month, raw.day)
    }
}

impl From<CalendarDate> for RawCalendarDate {
    fn from(date: CalendarDate) -> Self {
        Self {
            calendar: date.kind,
            era: date.era,
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use pretty_assertions::assert_eq;

    fn greg(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::gregorian(y, m, d).unwrap()
    }

    #[test]
    fn test_new_validates_month() {
        let err = CalendarDate::new(CalendarKind::Gregorian, Era::Common, 2024, 13, 1).unwrap_err();
        assert_eq!(err, DateError::InvalidMonth { month: 13, max: 12 });
    }

    #[test]
    fn test_new_validates_day() {
        let err = CalendarDate::new(CalendarKind::Gregorian, Era::Common, 2023, 2, 29).unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidDay {
                day: 29,
                month: 2,
                max: 28
            }
        );
    }

    #[test]
    fn test_new_validates_era() {
        let err = CalendarDate::new(CalendarKind::Buddhist, Era::Common, 2567, 1, 1).unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidEra {
                era: Era::Common,
                calendar: CalendarKind::Buddhist
            }
        );
    }

    #[test]
    fn test_new_rejects_extreme_era_years() {
        let err =
            CalendarDate::new(CalendarKind::Gregorian, Era::BeforeCommon, i32::MIN, 1, 1)
                .unwrap_err();
        assert_eq!(err, DateError::OutOfRange { year: i32::MIN });

        let err = CalendarDate::new(CalendarKind::Japanese, Era::Reiwa, i32::MAX, 1, 1)
            .unwrap_err();
        assert_eq!(err, DateError::OutOfRange { year: i32::MAX });
    }

    #[test]
    fn test_new_canonicalizes_japanese_era() {
        // Taisho began on 1912-07-30, so Taisho 1 July 1 names a Meiji day
        // and construction relabels it.
        let date = CalendarDate::new(CalendarKind::Japanese, Era::Taisho, 1, 7, 1).unwrap();
        assert_eq!(date.era(), Era::Meiji);
        assert_eq!(date.year(), 45);
        assert_eq!(date.iso(), NaiveDate::from_ymd_opt(1912, 7, 1).unwrap());
    }

    #[test]
    fn test_before_common_era() {
        let date = CalendarDate::new(CalendarKind::Gregorian, Era::BeforeCommon, 1, 3, 15).unwrap();
        assert_eq!(date.iso().year(), 0);
        assert_eq!(date.era(), Era::BeforeCommon);
        assert_eq!(date.year(), 1);
        assert_eq!(date.iso().month(), 3);
    }

    #[test]
    fn test_to_calendar_preserves_day() {
        let date = greg(2024, 4, 30);
        let buddhist = date.to_calendar(CalendarKind::Buddhist);
        assert_eq!(buddhist.year(), 2567);
        assert_eq!(buddhist.month(), 4);
        assert_eq!(buddhist.day(), 30);
        assert_eq!(buddhist.iso(), date.iso());
        assert_eq!(buddhist, date);
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(greg(2024, 1, 31).add(DateDuration::months(1)), greg(2024, 2, 29));
        assert_eq!(greg(2023, 1, 31).add(DateDuration::months(1)), greg(2023, 2, 28));
    }

    #[test]
    fn test_add_years_clamps_leap_day() {
        assert_eq!(greg(2024, 2, 29).add(DateDuration::years(1)), greg(2025, 2, 28));
    }

    #[test]
    fn test_add_months_across_year_boundary() {
        assert_eq!(greg(2024, 1, 15).add(DateDuration::months(-1)), greg(2023, 12, 15));
        assert_eq!(greg(2024, 1, 15).add(DateDuration::months(23)), greg(2025, 12, 15));
    }

    #[test]
    fn test_add_days_and_weeks() {
        assert_eq!(greg(2024, 2, 28).add(DateDuration::days(2)), greg(2024, 3, 1));
        assert_eq!(greg(2024, 2, 28).add(DateDuration::weeks(1)), greg(2024, 3, 6));
    }

    #[test]
    fn test_subtract_inverts_day_arithmetic() {
        let date = greg(2024, 6, 10);
        let moved = date.add(DateDuration::days(45));
        assert_eq!(moved.subtract(DateDuration::days(45)), date);
    }

    #[test]
    fn test_arithmetic_in_indian_calendar() {
        // Chaitra has 31 days in Saka 1946 and 30 in 1947.
        let date = CalendarDate::from_ymd(CalendarKind::Indian, 1946, 1, 31).unwrap();
        let next_year = date.add(DateDuration::years(1));
        assert_eq!(next_year.year(), 1947);
        assert_eq!(next_year.month(), 1);
        assert_eq!(next_year.day(), 30);
    }

    #[test]
    fn test_saturates_at_bounds() {
        let max = CalendarDate::from_iso(CalendarKind::Gregorian, NaiveDate::MAX);
        assert_eq!(max.add(DateDuration::days(1)), max);
        assert_eq!(max.add(DateDuration::years(5)), max);

        let min = CalendarDate::from_iso(CalendarKind::Gregorian, NaiveDate::MIN);
        assert_eq!(min.subtract(DateDuration::days(1)), min);
        assert_eq!(min.subtract(DateDuration::months(7)), min);
    }

    #[test]
    fn test_ordering_across_calendars() {
        let a = greg(2024, 5, 1);
        let b = greg(2024, 5, 2).to_calendar(CalendarKind::Japanese);
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn test_serde_round_trip() {
        let date = CalendarDate::new(CalendarKind::Japanese, Era::Reiwa, 6, 5, 1).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(
            json,
            r#"{"calendar":"japanese","era":"reiwa","year":6,"month":5,"day":1}"#
        );
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
        assert_eq!(back.era(), Era::Reiwa);
    }

    #[test]
    fn test_serde_rejects_invalid_fields() {
        let json = r#"{"calendar":"gregory","era":"ad","year":2023,"month":2,"day":29}"#;
        assert!(serde_json::from_str::<CalendarDate>(json).is_err());
    }
}
