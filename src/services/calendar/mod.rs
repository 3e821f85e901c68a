//! Calendar system registry.
//! Maps between the canonical ISO day (proleptic Gregorian, `chrono::NaiveDate`)
//! and the era/year/month/day view of each supported calendar system.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

mod buddhist;
mod gregorian;
mod indian;
mod japanese;
mod minguo;

/// Error type for fallible date construction and calendar lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Returned when a month number is outside the calendar year.
    #[error("invalid month: {month} (must be 1..={max})")]
    InvalidMonth { month: u8, max: u8 },

    /// Returned when a day number exceeds the days in the given month.
    #[error("invalid day: {day} for month {month} (max {max})")]
    InvalidDay { day: u8, month: u8, max: u8 },

    /// Returned when an era belongs to a different calendar system.
    #[error("era {era} does not belong to the {calendar} calendar")]
    InvalidEra { era: Era, calendar: CalendarKind },

    /// Returned when a calendar identifier is not recognised.
    #[error("unknown calendar identifier: {identifier}")]
    UnknownCalendar { identifier: String },

    /// Returned when a field combination falls outside the representable range.
    #[error("date outside the representable range: year {year}")]
    OutOfRange { year: i32 },
}

/// The supported calendar systems.
///
/// Identifiers follow the BCP 47 `ca` extension keys, so a kind can be
/// resolved from a locale tag such as `th-TH-u-ca-buddhist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    /// Proleptic Gregorian calendar, eras BC/AD. Identifier `gregory`.
    #[serde(rename = "gregory", alias = "gregorian", alias = "iso8601")]
    Gregorian,
    /// Thai Buddhist calendar, single era BE. Identifier `buddhist`.
    Buddhist,
    /// Republic of China (Minguo) calendar, epoch 1912. Identifier `roc`.
    #[serde(rename = "roc")]
    Minguo,
    /// Japanese imperial calendar, eras Meiji through Reiwa. Identifier `japanese`.
    Japanese,
    /// Indian national (Saka) calendar. Identifier `indian`.
    Indian,
}

impl CalendarKind {
    /// The BCP 47 calendar identifier for this kind.
    pub fn identifier(self) -> &'static str {
        match self {
            CalendarKind::Gregorian => "gregory",
            CalendarKind::Buddhist => "buddhist",
            CalendarKind::Minguo => "roc",
            CalendarKind::Japanese => "japanese",
            CalendarKind::Indian => "indian",
        }
    }

    /// Resolve a BCP 47 calendar identifier.
    ///
    /// `iso8601` is accepted as an alias for the Gregorian calendar, which is
    /// how locale data commonly spells it.
    pub fn from_identifier(identifier: &str) -> Result<Self, DateError> {
        match identifier {
            "gregory" | "gregorian" | "iso8601" => Ok(CalendarKind::Gregorian),
            "buddhist" => Ok(CalendarKind::Buddhist),
            "roc" => Ok(CalendarKind::Minguo),
            "japanese" => Ok(CalendarKind::Japanese),
            "indian" => Ok(CalendarKind::Indian),
            _ => Err(DateError::UnknownCalendar {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// The factory: look up the system implementation for this kind.
    pub fn system(self) -> &'static dyn CalendarSystem {
        match self {
            CalendarKind::Gregorian => &gregorian::Gregorian,
            CalendarKind::Buddhist => &buddhist::Buddhist,
            CalendarKind::Minguo => &minguo::Minguo,
            CalendarKind::Japanese => &japanese::Japanese,
            CalendarKind::Indian => &indian::Indian,
        }
    }

    /// The eras of this calendar system, in chronological order.
    pub fn eras(self) -> &'static [Era] {
        self.system().eras()
    }
}

impl Default for CalendarKind {
    fn default() -> Self {
        CalendarKind::Gregorian
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Era identifiers across all supported calendar systems.
///
/// Serialized form matches [`Era::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    /// Gregorian era before the common era (years count backwards).
    #[serde(rename = "bc")]
    BeforeCommon,
    /// Gregorian common era.
    #[serde(rename = "ad")]
    Common,
    /// Buddhist era (BE), offset +543 from the common era.
    #[serde(rename = "be")]
    BuddhistEra,
    /// Minguo years before the 1912 epoch (years count backwards).
    BeforeMinguo,
    /// Minguo era from the 1912 epoch.
    #[serde(rename = "minguo")]
    MinguoEra,
    /// Japanese Meiji era, from 1868-09-08.
    Meiji,
    /// Japanese Taisho era, from 1912-07-30.
    Taisho,
    /// Japanese Showa era, from 1926-12-25.
    Showa,
    /// Japanese Heisei era, from 1989-01-08.
    Heisei,
    /// Japanese Reiwa era, from 2019-05-01.
    Reiwa,
    /// Indian national Saka era.
    Saka,
}

impl Era {
    /// Short lowercase code for the era, useful for serialization and display.
    pub fn code(self) -> &'static str {
        match self {
            Era::BeforeCommon => "bc",
            Era::Common => "ad",
            Era::BuddhistEra => "be",
            Era::BeforeMinguo => "before_minguo",
            Era::MinguoEra => "minguo",
            Era::Meiji => "meiji",
            Era::Taisho => "taisho",
            Era::Showa => "showa",
            Era::Heisei => "heisei",
            Era::Reiwa => "reiwa",
            Era::Saka => "saka",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A date on a calendar system's linear year axis, with eras removed.
///
/// This is the plane on which year and month arithmetic runs. For the
/// Gregorian-derived systems the axis is the principal era continued through
/// zero and negative years; for the Indian calendar it is the Saka year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl ExtendedDate {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

/// Structure and era labeling of one calendar system.
///
/// Implementations convert between the ISO plane and their extended field
/// plane, report month lengths, and map extended years to era-relative
/// years. All conversions are total: every ISO day has a representation in
/// every system, and equal ISO days always convert to each other.
pub trait CalendarSystem: fmt::Debug + Send + Sync {
    /// Which kind this system implements.
    fn kind(&self) -> CalendarKind;

    /// The eras of this system, in chronological order.
    fn eras(&self) -> &'static [Era];

    /// Convert an ISO day to this system's extended fields.
    fn extended_from_iso(&self, iso: NaiveDate) -> ExtendedDate;

    /// Convert extended fields back to an ISO day.
    ///
    /// Returns `None` when the fields fall outside the representable range;
    /// callers saturate rather than fail.
    fn iso_from_extended(&self, ext: ExtendedDate) -> Option<NaiveDate>;

    /// Number of days in the given month of the given extended year.
    fn days_in_month(&self, year: i32, month: u8) -> u8;

    /// Number of months in the given extended year.
    fn months_in_year(&self, _year: i32) -> u8 {
        12
    }

    /// Label an extended date with its era and era-relative year.
    fn era_fields(&self, ext: ExtendedDate) -> (Era, i32);

    /// Map an era-relative year back onto the extended year axis.
    fn extended_year(&self, era: Era, year: i32) -> Result<i32, DateError>;
}

// Shared civil (ISO-month) structure used by the Gregorian-derived systems.
// Only the year labeling differs between those systems.

pub(crate) fn civil_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if civil_is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub(crate) fn civil_is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub(crate) fn civil_from_iso(iso: NaiveDate) -> ExtendedDate {
    ExtendedDate::new(iso.year(), iso.month() as u8, iso.day() as u8)
}

pub(crate) fn civil_to_iso(ext: ExtendedDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(ext.year, u32::from(ext.month), u32::from(ext.day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("gregory", CalendarKind::Gregorian; "gregory")]
    #[test_case("iso8601", CalendarKind::Gregorian; "iso8601 alias")]
    #[test_case("buddhist", CalendarKind::Buddhist; "buddhist")]
    #[test_case("roc", CalendarKind::Minguo; "roc")]
    #[test_case("japanese", CalendarKind::Japanese; "japanese")]
    #[test_case("indian", CalendarKind::Indian; "indian")]
    fn test_from_identifier(identifier: &str, expected: CalendarKind) {
        assert_eq!(CalendarKind::from_identifier(identifier).unwrap(), expected);
    }

    #[test]
    fn test_from_identifier_unknown() {
        let err = CalendarKind::from_identifier("hebrew").unwrap_err();
        assert_eq!(
            err,
            DateError::UnknownCalendar {
                identifier: "hebrew".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown calendar identifier: hebrew");
    }

    #[test]
    fn test_identifier_round_trip() {
        for kind in [
            CalendarKind::Gregorian,
            CalendarKind::Buddhist,
            CalendarKind::Minguo,
            CalendarKind::Japanese,
            CalendarKind::Indian,
        ] {
            assert_eq!(
                CalendarKind::from_identifier(kind.identifier()).unwrap(),
                kind
            );
        }
    }

    #[test]
    fn test_system_kind_matches() {
        for kind in [
            CalendarKind::Gregorian,
            CalendarKind::Buddhist,
            CalendarKind::Minguo,
            CalendarKind::Japanese,
            CalendarKind::Indian,
        ] {
            assert_eq!(kind.system().kind(), kind);
        }
    }

    #[test]
    fn test_civil_days_in_month() {
        assert_eq!(civil_days_in_month(2024, 2), 29);
        assert_eq!(civil_days_in_month(2025, 2), 28);
        assert_eq!(civil_days_in_month(1900, 2), 28);
        assert_eq!(civil_days_in_month(2000, 2), 29);
        assert_eq!(civil_days_in_month(2024, 4), 30);
        assert_eq!(civil_days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<DateError>();
    }

    #[test]
    fn test_error_display() {
        let err = DateError::InvalidDay {
            day: 31,
            month: 4,
            max: 30,
        };
        assert_eq!(err.to_string(), "invalid day: 31 for month 4 (max 30)");
    }
}
