//! Republic of China (Minguo) calendar.
//!
//! Gregorian month structure with the epoch at civil 1912: Minguo year 1 is
//! 1912, and years before the epoch count backwards in their own era, so
//! civil 1911 is "before Minguo" year 1.

use chrono::{Datelike, NaiveDate};

use super::{
    civil_days_in_month, civil_from_iso, CalendarKind, CalendarSystem, DateError, Era,
    ExtendedDate,
};

const YEAR_OFFSET: i32 = 1911;

#[derive(Debug)]
pub(crate) struct Minguo;

const ERAS: &[Era] = &[Era::BeforeMinguo, Era::MinguoEra];

impl CalendarSystem for Minguo {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Minguo
    }

    fn eras(&self) -> &'static [Era] {
        ERAS
    }

    fn extended_from_iso(&self, iso: NaiveDate) -> ExtendedDate {
        let mut ext = civil_from_iso(iso);
        ext.year = iso.year().saturating_sub(YEAR_OFFSET);
        ext
    }

    fn iso_from_extended(&self, ext: ExtendedDate) -> Option<NaiveDate> {
        let civil_year = ext.year.checked_add(YEAR_OFFSET)?;
        NaiveDate::from_ymd_opt(civil_year, u32::from(ext.month), u32::from(ext.day))
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        civil_days_in_month(year.saturating_add(YEAR_OFFSET), month)
    }

    fn era_fields(&self, ext: ExtendedDate) -> (Era, i32) {
        if ext.year > 0 {
            (Era::MinguoEra, ext.year)
        } else {
            (Era::BeforeMinguo, 1 - ext.year)
        }
    }

    fn extended_year(&self, era: Era, year: i32) -> Result<i32, DateError> {
        match era {
            Era::MinguoEra => Ok(year),
            Era::BeforeMinguo => 1i32
                .checked_sub(year)
                .ok_or(DateError::OutOfRange { year }),
            _ => Err(DateError::InvalidEra {
                era,
                calendar: CalendarKind::Minguo,
            }),
        }
    }
}
