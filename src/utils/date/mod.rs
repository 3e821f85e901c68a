// Date utility functions

use chrono::{Datelike, Local, Utc, Weekday};
use chrono_tz::Tz;

use crate::models::date::CalendarDate;
use crate::models::duration::DateDuration;
use crate::services::calendar::CalendarKind;

pub fn is_same_day(a: &CalendarDate, b: &CalendarDate) -> bool {
    a.iso() == b.iso()
}

/// Zero based column of the date in a week that starts on `first_day`.
pub fn day_of_week(date: &CalendarDate, first_day: Weekday) -> u8 {
    let day = date.iso().weekday().num_days_from_sunday() as i32;
    let first = first_day.num_days_from_sunday() as i32;
    (day - first).rem_euclid(7) as u8
}

pub fn start_of_week(date: &CalendarDate, first_day: Weekday) -> CalendarDate {
    date.subtract(DateDuration::days(i32::from(day_of_week(date, first_day))))
}

pub fn end_of_week(date: &CalendarDate, first_day: Weekday) -> CalendarDate {
    start_of_week(date, first_day).add(DateDuration::days(6))
}

pub fn start_of_month(date: &CalendarDate) -> CalendarDate {
    let mut ext = date.extended();
    ext.day = 1;
    CalendarDate::from_extended_clamped(date.kind(), ext)
}

pub fn end_of_month(date: &CalendarDate) -> CalendarDate {
    let mut ext = date.extended();
    ext.day = date.days_in_month();
    CalendarDate::from_extended_clamped(date.kind(), ext)
}

pub fn start_of_year(date: &CalendarDate) -> CalendarDate {
    let mut ext = date.extended();
    ext.month = 1;
    ext.day = 1;
    CalendarDate::from_extended_clamped(date.kind(), ext)
}

pub fn end_of_year(date: &CalendarDate) -> CalendarDate {
    let system = date.kind().system();
    let mut ext = date.extended();
    ext.month = system.months_in_year(ext.year);
    ext.day = system.days_in_month(ext.year, ext.month);
    CalendarDate::from_extended_clamped(date.kind(), ext)
}

/// Number of week rows the date's month spans when weeks start on
/// `first_day`.
pub fn weeks_in_month(date: &CalendarDate, first_day: Weekday) -> u8 {
    let start = start_of_month(date);
    let leading = u32::from(day_of_week(&start, first_day));
    let days = u32::from(date.days_in_month());
    ((leading + days).div_ceil(7)) as u8
}

/// Today in the given calendar system. With a time zone the civil day is
/// taken in that zone, otherwise in the system's local zone.
pub fn today(kind: CalendarKind, zone: Option<Tz>) -> CalendarDate {
    let iso = match zone {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => Local::now().date_naive(),
    };
    CalendarDate::from_iso(kind, iso)
}
