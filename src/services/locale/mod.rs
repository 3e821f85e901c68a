//! Locale handling.
//!
//! Parses enough of a BCP 47 tag to drive a calendar: language, region and
//! the `u` extension keys `ca` (calendar system) and `fw` (first day of
//! week). Parsing is lenient. Unrecognised subtags are skipped and bad
//! extension values are logged and ignored, so a malformed tag degrades to
//! sensible defaults instead of failing.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::services::calendar::CalendarKind;

/// A parsed locale tag.
///
/// Serializes as the original tag string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale {
    tag: String,
    language: String,
    region: Option<String>,
    calendar: Option<CalendarKind>,
    first_day: Option<Weekday>,
}

impl Locale {
    /// Parse a locale tag such as `en-US`, `th-TH-u-ca-buddhist` or
    /// `fr-FR-u-fw-sun`.
    pub fn new(tag: &str) -> Self {
        let mut subtags = tag.split('-');
        let language = subtags
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let mut region = None;
        let mut calendar = None;
        let mut first_day = None;
        let mut in_extensions = false;
        let mut pending_key: Option<String> = None;

        for subtag in subtags {
            if subtag.eq_ignore_ascii_case("u") {
                in_extensions = true;
                pending_key = None;
                continue;
            }
            if in_extensions {
                match pending_key.as_deref() {
                    Some("ca") => {
                        match CalendarKind::from_identifier(&subtag.to_ascii_lowercase()) {
                            Ok(kind) => calendar = Some(kind),
                            Err(err) => {
                                log::warn!("ignoring calendar extension in {tag:?}: {err}");
                            }
                        }
                        pending_key = None;
                    }
                    Some("fw") => {
                        match parse_weekday(subtag) {
                            Some(day) => first_day = Some(day),
                            None => {
                                log::warn!(
                                    "ignoring first day of week extension in {tag:?}: {subtag:?}"
                                );
                            }
                        }
                        pending_key = None;
                    }
                    _ => {
                        if subtag.len() == 2 {
                            pending_key = Some(subtag.to_ascii_lowercase());
                        }
                    }
                }
            } else if region.is_none()
                && subtag.len() == 2
                && subtag.bytes().all(|b| b.is_ascii_alphabetic())
            {
                region = Some(subtag.to_ascii_uppercase());
            }
        }

        Self {
            tag: tag.to_string(),
            language,
            region,
            calendar,
            first_day,
        }
    }

    /// The tag this locale was parsed from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The calendar system the locale selects: the `ca` extension when
    /// present, otherwise the region's preferred calendar.
    pub fn calendar(&self) -> CalendarKind {
        if let Some(kind) = self.calendar {
            return kind;
        }
        match self.region.as_deref() {
            // CLDR calendarPreferenceData. Thailand is the only region
            // among the supported systems that prefers a non-Gregorian
            // calendar by default.
            Some("TH") => CalendarKind::Buddhist,
            _ => CalendarKind::Gregorian,
        }
    }

    /// The first day of the week: the `fw` extension when present,
    /// otherwise the region's day from CLDR week data, otherwise Monday.
    pub fn first_day_of_week(&self) -> Weekday {
        if let Some(day) = self.first_day {
            return day;
        }
        match self.region.as_deref() {
            Some(region) => region_first_day(region),
            None => Weekday::Mon,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new("en-US")
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Locale::new(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag
    }
}

fn parse_weekday(subtag: &str) -> Option<Weekday> {
    match subtag.to_ascii_lowercase().as_str() {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

// CLDR supplemental week data, regions that do not start on Monday.
fn region_first_day(region: &str) -> Weekday {
    match region {
        "MV" => Weekday::Fri,
        "AE" | "AF" | "BH" | "DJ" | "DZ" | "EG" | "IQ" | "IR" | "JO" | "KW" | "LY" | "OM"
        | "QA" | "SD" | "SY" => Weekday::Sat,
        "AG" | "AS" | "AU" | "BD" | "BR" | "BS" | "BT" | "BW" | "BZ" | "CA" | "CN" | "CO"
        | "DM" | "DO" | "ET" | "GT" | "GU" | "HK" | "HN" | "ID" | "IL" | "IN" | "JM" | "JP"
        | "KE" | "KH" | "KR" | "LA" | "MH" | "MM" | "MO" | "MT" | "MX" | "MZ" | "NI" | "NP"
        | "PA" | "PE" | "PH" | "PK" | "PR" | "PT" | "PY" | "SA" | "SG" | "SV" | "TH" | "TT"
        | "TW" | "UM" | "US" | "VE" | "VI" | "WS" | "YE" | "ZA" | "ZW" => Weekday::Sun,
        _ => Weekday::Mon,
    }
}
