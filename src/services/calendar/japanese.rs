//! Japanese imperial calendar.
//!
//! Civil (Gregorian) month structure with era labels that switch on the exact
//! accession day, so 1989-01-07 is Showa 64 and 1989-01-08 is Heisei 1. The
//! extended year axis is the civil year; the era-relative year counts civil
//! years from the era's first year. Dates before 1868-09-08 stay labeled
//! Meiji with year zero or below rather than reaching for pre-modern eras.

use chrono::NaiveDate;

use super::{
    civil_days_in_month, civil_from_iso, civil_to_iso, CalendarKind, CalendarSystem, DateError,
    Era, ExtendedDate,
};

#[derive(Debug)]
pub(crate) struct Japanese;

const ERAS: &[Era] = &[Era::Meiji, Era::Taisho, Era::Showa, Era::Heisei, Era::Reiwa];

// Accession days, in chronological order. (era, year, month, day)
const ERA_STARTS: &[(Era, i32, u8, u8)] = &[
    (Era::Meiji, 1868, 9, 8),
    (Era::Taisho, 1912, 7, 30),
    (Era::Showa, 1926, 12, 25),
    (Era::Heisei, 1989, 1, 8),
    (Era::Reiwa, 2019, 5, 1),
];

impl CalendarSystem for Japanese {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Japanese
    }

    fn eras(&self) -> &'static [Era] {
        ERAS
    }

    fn extended_from_iso(&self, iso: NaiveDate) -> ExtendedDate {
        civil_from_iso(iso)
    }

    fn iso_from_extended(&self, ext: ExtendedDate) -> Option<NaiveDate> {
        civil_to_iso(ext)
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        civil_days_in_month(year, month)
    }

    fn era_fields(&self, ext: ExtendedDate) -> (Era, i32) {
        let mut current = ERA_STARTS[0];
        for &candidate in ERA_STARTS {
            let (_, year, month, day) = candidate;
            if (ext.year, ext.month, ext.day) >= (year, month, day) {
                current = candidate;
            } else {
                break;
            }
        }
        let (era, start_year, _, _) = current;
        (era, ext.year - start_year + 1)
    }

    fn extended_year(&self, era: Era, year: i32) -> Result<i32, DateError> {
        for &(candidate, start_year, _, _) in ERA_STARTS {
            if candidate == era {
                return start_year
                    .checked_add(year)
                    .and_then(|sum| sum.checked_sub(1))
                    .ok_or(DateError::OutOfRange { year });
            }
        }
        Err(DateError::InvalidEra {
            era,
            calendar: CalendarKind::Japanese,
        })
    }
}
