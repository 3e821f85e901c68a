//! Proleptic Gregorian calendar with BC/AD eras.
//!
//! The extended year axis is the ISO year itself, so conversion is the
//! identity and the only work is era labeling: extended year 0 is 1 BC,
//! extended year -1 is 2 BC.

use chrono::NaiveDate;

use super::{
    civil_days_in_month, civil_from_iso, civil_to_iso, CalendarKind, CalendarSystem, DateError,
    Era, ExtendedDate,
};

#[derive(Debug)]
pub(crate) struct Gregorian;

const ERAS: &[Era] = &[Era::BeforeCommon, Era::Common];

impl CalendarSystem for Gregorian {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Gregorian
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
        if ext.year > 0 {
            (Era::Common, ext.year)
        } else {
            (Era::BeforeCommon, 1 - ext.year)
        }
    }

    fn extended_year(&self, era: Era, year: i32) -> Result<i32, DateError> {
        match era {
            Era::Common => Ok(year),
            Era::BeforeCommon => 1i32
                .checked_sub(year)
                .ok_or(DateError::OutOfRange { year }),
            _ => Err(DateError::InvalidEra {
                era,
                calendar: CalendarKind::Gregorian,
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
    fn test_extended_is_identity() {
        let ext = Gregorian.extended_from_iso(iso(2024, 2, 29));
        assert_eq!(ext, ExtendedDate::new(2024, 2, 29));
        assert_eq!(Gregorian.iso_from_extended(ext), Some(iso(2024, 2, 29)));
    }

    #[test]
    fn test_era_fields_common() {
        assert_eq!(
            Gregorian.era_fields(ExtendedDate::new(2024, 6, 1)),
            (Era::Common, 2024)
        );
    }

    #[test]
    fn test_era_fields_before_common() {
        // Extended year 0 is 1 BC, -1 is 2 BC.
        assert_eq!(
            Gregorian.era_fields(ExtendedDate::new(0, 6, 1)),
            (Era::BeforeCommon, 1)
        );
        assert_eq!(
            Gregorian.era_fields(ExtendedDate::new(-1, 6, 1)),
            (Era::BeforeCommon, 2)
        );
    }

    #[test]
    fn test_extended_year_round_trip() {
        for ext_year in [-10, -1, 0, 1, 1999, 2024] {
            let (era, year) = Gregorian.era_fields(ExtendedDate::new(ext_year, 1, 1));
            assert_eq!(Gregorian.extended_year(era, year).unwrap(), ext_year);
        }
    }

    #[test]
    fn test_extended_year_wrong_era() {
        assert!(Gregorian.extended_year(Era::Reiwa, 5).is_err());
    }

    #[test]
    fn test_extended_year_extreme_before_common() {
        assert_eq!(
            Gregorian.extended_year(Era::BeforeCommon, i32::MIN),
            Err(DateError::OutOfRange { year: i32::MIN })
        );
    }
}
