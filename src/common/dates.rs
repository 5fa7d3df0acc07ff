//! Helpers for the serialized date cells produced by the sheet endpoint.
//!
//! Date cells arrive as strings like `Date(2024,0,15)` or
//! `Date(2024,0,15,18,30)`. The month is zero-based on the wire and stays
//! zero-based in [`SheetDate`]; conversions add one where a calendar month is
//! needed.

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};

use super::errors::DateError;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formatting vocabulary for [`SheetDate::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    /// Day of month, unpadded: `5`
    Day,
    /// Day of month, two digits: `05`
    PaddedDay,
    /// Calendar month number, unpadded: `1`
    Month,
    /// Calendar month number, two digits: `01`
    PaddedMonth,
    /// Three-letter month name: `Jan`
    MonthAbbrev,
    /// Full month name: `January`
    MonthFull,
    /// Last two digits of the year: `24`
    YearShort,
    /// Full year: `2024`
    YearFull,
}

/// The default rendering, e.g. `15 Jan 2024`.
pub const DEFAULT_FORMAT: [DateToken; 3] =
    [DateToken::Day, DateToken::MonthAbbrev, DateToken::YearFull];

/// A date cell decoded from its wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetDate {
    year: i32,
    month0: u32,
    day: u32,
    hour: Option<u32>,
    minute: Option<u32>,
}

impl FromStr for SheetDate {
    type Err = DateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let unrecognized = || DateError::UnrecognizedFormat(raw.to_string());
        let start = raw.find('(').ok_or_else(unrecognized)?;
        let end = raw[start..].find(')').ok_or_else(unrecognized)? + start;
        let parts: Vec<&str> = raw[start + 1..end].split(',').map(str::trim).collect();
        if parts.len() < 3 {
            return Err(unrecognized());
        }

        let year: i32 = parts[0].parse().map_err(|_| unrecognized())?;
        let month0: u32 = parts[1].parse().map_err(|_| unrecognized())?;
        let day: u32 = parts[2].parse().map_err(|_| unrecognized())?;
        let hour = match parts.get(3) {
            Some(p) => Some(p.parse().map_err(|_| unrecognized())?),
            None => None,
        };
        let minute = match parts.get(4) {
            Some(p) => Some(p.parse().map_err(|_| unrecognized())?),
            None => None,
        };

        if month0 > 11 {
            return Err(DateError::OutOfRange(format!("month index {}", month0)));
        }

        Ok(Self {
            year,
            month0,
            day,
            hour,
            minute,
        })
    }
}

impl SheetDate {
    /// Midnight is assumed when the cell carried no time component.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, DateError> {
        Utc.with_ymd_and_hms(
            self.year,
            self.month0 + 1,
            self.day,
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            0,
        )
        .single()
        .ok_or_else(|| {
            DateError::OutOfRange(format!(
                "{}-{}-{} {}:{}",
                self.year,
                self.month0 + 1,
                self.day,
                self.hour.unwrap_or(0),
                self.minute.unwrap_or(0)
            ))
        })
    }

    pub fn format(&self, tokens: &[DateToken], separator: &str) -> String {
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            match token {
                DateToken::Day => out.push_str(&self.day.to_string()),
                DateToken::PaddedDay => out.push_str(&format!("{:02}", self.day)),
                DateToken::Month => out.push_str(&(self.month0 + 1).to_string()),
                DateToken::PaddedMonth => out.push_str(&format!("{:02}", self.month0 + 1)),
                DateToken::MonthAbbrev => out.push_str(&MONTHS[self.month0 as usize][..3]),
                DateToken::MonthFull => out.push_str(MONTHS[self.month0 as usize]),
                DateToken::YearShort => out.push_str(&format!("{:02}", self.year.rem_euclid(100))),
                DateToken::YearFull => out.push_str(&self.year.to_string()),
            }
        }
        out
    }
}
