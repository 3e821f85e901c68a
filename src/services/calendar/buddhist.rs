//! Thai Buddhist calendar.
//!
//! Same month structure as the Gregorian calendar, single era, years offset
//! by +543: Gregorian 2024 is 2567 BE.

use chrono::{Datelike, NaiveDate};

use super::{
    civil_days_in_month, civil_from_iso, CalendarKind, CalendarSystem, DateError, Era,
    ExtendedDate,
};

const YEAR_OFFSET: i32 = 543;

#[derive(Debug)]
pub(crate) struct Buddhist;

const ERAS: &[Era] = &[Era::BuddhistEra];

impl CalendarSystem for Buddhist {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Buddhist
    }

    fn eras(&self) -> &'static [Era] {
        ERAS
    }

    fn extended_from_iso(&self, iso: NaiveDate) -> ExtendedDate {
        let mut ext = civil_from_iso(iso);
        ext.year = iso.year().saturating_add(YEAR_OFFSET);
        ext
    }

    fn iso_from_extended(&self, ext: ExtendedDate) -> Option<NaiveDate> {
        let civil_year = ext.year.checked_sub(YEAR_OFFSET)?;
        NaiveDate::from_ymd_opt(civil_year, u32::from(ext.month), u32::from(ext.day))
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        civil_days_in_month(year.saturating_sub(YEAR_OFFSET), month)
    }

    fn era_fields(&self, ext: ExtendedDate) -> (Era, i32) {
        (Era::BuddhistEra, ext.year)
    }

    fn extended_year(&self, era: Era, year: i32) -> Result<i32, DateError> {
        match era {
            Era::BuddhistEra => Ok(year),
            _ => Err(DateError::InvalidEra {
                era,
                calendar: CalendarKind::Buddhist,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_offset() {
        let ext = Buddhist.extended_from_iso(iso(2024, 1, 15));
        assert_eq!(ext, ExtendedDate::new(2567, 1, 15));
        assert_eq!(Buddhist.iso_from_extended(ext), Some(iso(2024, 1, 15)));
    }

    #[test]
    fn test_leap_year_follows_civil_year() {
        // BE 2567 maps onto civil 2024, a leap year.
        assert_eq!(Buddhist.days_in_month(2567, 2), 29);
        assert_eq!(Buddhist.days_in_month(2568, 2), 28);
    }

    #[test]
    fn test_single_era() {
        assert_eq!(
            Buddhist.era_fields(ExtendedDate::new(2567, 5, 1)),
            (Era::BuddhistEra, 2567)
        );
        assert_eq!(Buddhist.extended_year(Era::BuddhistEra, 2567).unwrap(), 2567);
        assert!(Buddhist.extended_year(Era::Common, 2024).is_err());
    }
}
