//! Indian national (Saka) calendar.
//!
//! The civil solar calendar adopted in 1957. Saka year Y begins on 22 March
//! of civil year Y + 78, or 21 March when that civil year is a leap year.
//! Chaitra (month 1) has 30 days, 31 in leap years; months 2 through 6 have
//! 31 days and months 7 through 12 have 30.

use chrono::{Datelike, NaiveDate};

use super::{civil_is_leap_year, CalendarKind, CalendarSystem, DateError, Era, ExtendedDate};

// Saka years trail the civil year they begin in by this much.
const ERA_OFFSET: i32 = 78;

// Zero based civil day-of-year of the Saka new year. Works for both leap
// and common civil years: day 80 is 21 March after a 29 day February and
// 22 March otherwise.
const YEAR_START_DOY: i32 = 80;

#[derive(Debug)]
pub(crate) struct Indian;

const ERAS: &[Era] = &[Era::Saka];

fn chaitra_days(saka_year: i32) -> i32 {
    if civil_is_leap_year(saka_year.saturating_add(ERA_OFFSET)) {
        31
    } else {
        30
    }
}

impl CalendarSystem for Indian {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Indian
    }

    fn eras(&self) -> &'static [Era] {
        ERAS
    }

    fn extended_from_iso(&self, iso: NaiveDate) -> ExtendedDate {
        let civil_year = iso.year();
        let mut saka = civil_year - ERA_OFFSET;
        let mut y_day = iso.ordinal0() as i32;

        let chaitra;
        if y_day < YEAR_START_DOY {
            // Before the new year, so still in the Saka year that began in
            // the previous civil year. Re-anchor the day count to it without
            // constructing a date that may sit outside the supported range.
            saka -= 1;
            chaitra = chaitra_days(saka);
            y_day += chaitra + 31 * 5 + 30 * 3 + 10;
        } else {
            chaitra = chaitra_days(saka);
            y_day -= YEAR_START_DOY;
        }

        let (month, day) = if y_day < chaitra {
            (1, y_day + 1)
        } else {
            let m_day = y_day - chaitra;
            if m_day < 31 * 5 {
                (m_day / 31 + 2, m_day % 31 + 1)
            } else {
                let m_day = m_day - 31 * 5;
                (m_day / 30 + 7, m_day % 30 + 1)
            }
        };
        ExtendedDate::new(saka, month as u8, day as u8)
    }

    fn iso_from_extended(&self, ext: ExtendedDate) -> Option<NaiveDate> {
        let civil_year = ext.year.checked_add(ERA_OFFSET)?;
        let chaitra = i64::from(chaitra_days(ext.year));
        let new_year_day = if chaitra == 31 { 21 } else { 22 };
        let start = NaiveDate::from_ymd_opt(civil_year, 3, new_year_day)?;

        let mut offset = i64::from(ext.day) - 1;
        if ext.month > 1 {
            offset += chaitra + 31 * i64::from((ext.month - 2).min(5));
            if ext.month >= 8 {
                offset += 30 * i64::from(ext.month - 7);
            }
        }
        start.checked_add_signed(chrono::Duration::days(offset))
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        match month {
            1 => chaitra_days(year) as u8,
            2..=6 => 31,
            _ => 30,
        }
    }

    fn era_fields(&self, ext: ExtendedDate) -> (Era, i32) {
        (Era::Saka, ext.year)
    }

    fn extended_year(&self, era: Era, year: i32) -> Result<i32, DateError> {
        match era {
            Era::Saka => Ok(year),
            _ => Err(DateError::InvalidEra {
                era,
                calendar: CalendarKind::Indian,
            }),
        }
    }
}
