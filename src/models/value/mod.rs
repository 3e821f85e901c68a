//! Selected-value model.
//!
//! A selection can be a plain date, a date with a wall-clock time, or a
//! zoned timestamp. Selecting a day in the calendar replaces only the date
//! part, so whatever time and zone the caller handed in survive the edit.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::date::CalendarDate;
use crate::services::calendar::CalendarKind;

/// A selected calendar value.
// Untagged, so variants deserialize by shape; keep the most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// A timestamp pinned to a time zone.
    Zoned {
        date: CalendarDate,
        time: NaiveTime,
        zone: Tz,
    },
    /// A date with a wall-clock time and no zone.
    DateTime { date: CalendarDate, time: NaiveTime },
    /// A plain date.
    Date(CalendarDate),
}

impl DateValue {
    /// The date component.
    pub fn date(&self) -> CalendarDate {
        match self {
            DateValue::Zoned { date, .. } => *date,
            DateValue::DateTime { date, .. } => *date,
            DateValue::Date(date) => *date,
        }
    }

    /// The calendar system the value was created in.
    pub fn calendar(&self) -> CalendarKind {
        self.date().kind()
    }

    /// Replace the date component, keeping time and zone.
    pub fn with_date(self, date: CalendarDate) -> Self {
        match self {
            DateValue::Zoned { time, zone, .. } => DateValue::Zoned { date, time, zone },
            DateValue::DateTime { time, .. } => DateValue::DateTime { date, time },
            DateValue::Date(_) => DateValue::Date(date),
        }
    }
}

impl From<CalendarDate> for DateValue {
    fn from(date: CalendarDate) -> Self {
        DateValue::Date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greg(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::gregorian(y, m, d).unwrap()
    }

    #[test]
    fn test_with_date_keeps_time_and_zone() {
        let value = DateValue::Zoned {
            date: greg(2024, 5, 10),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            zone: chrono_tz::Asia::Tokyo,
        };
        let moved = value.with_date(greg(2024, 6, 1));
        assert_eq!(moved.date(), greg(2024, 6, 1));
        match moved {
            DateValue::Zoned { time, zone, .. } => {
                assert_eq!(time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
                assert_eq!(zone, chrono_tz::Asia::Tokyo);
            }
            other => panic!("expected zoned value, got {other:?}"),
        }
    }

    #[test]
    fn test_calendar_follows_date() {
        let date = greg(2024, 5, 10).to_calendar(CalendarKind::Buddhist);
        let value = DateValue::from(date);
        assert_eq!(value.calendar(), CalendarKind::Buddhist);
    }

    #[test]
    fn test_serde_shapes() {
        let plain = DateValue::from(greg(2024, 5, 10));
        let json = serde_json::to_string(&plain).unwrap();
        assert_eq!(
            json,
            r#"{"calendar":"gregory","era":"ad","year":2024,"month":5,"day":10}"#
        );
        assert_eq!(serde_json::from_str::<DateValue>(&json).unwrap(), plain);

        let timed = DateValue::DateTime {
            date: greg(2024, 5, 10),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&timed).unwrap();
        assert_eq!(serde_json::from_str::<DateValue>(&json).unwrap(), timed);

        let zoned = DateValue::Zoned {
            date: greg(2024, 5, 10),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            zone: chrono_tz::America::New_York,
        };
        let json = serde_json::to_string(&zoned).unwrap();
        assert_eq!(serde_json::from_str::<DateValue>(&json).unwrap(), zoned);
    }
}
