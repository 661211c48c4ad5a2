//! Text formatting for dashboard widgets.

use crate::core::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

pub const NO_MEETINGS: &str = "# 🤘 No meetings for today! Hooray! 🙂‍↕️ #";
pub const BIRTHDAY_TODAY: &str = "# 🎉 Today 🎉 #";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeetingRecord {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BirthdayRecord {
    pub title: String,
    pub start_date: String,
}

/// Parses an ISO-8601 timestamp keeping its wall-clock time.
///
/// Offsets are accepted but not applied, so `10:20+03:00` stays `10:20`.
/// Date-only values resolve to midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt);
        }
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(NaiveTime::default())),
        // Report the full timestamp failure, which names the calendar problem.
        Err(_) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map_err(|source| {
            Error::InvalidTimestamp {
                value: value.to_string(),
                source,
            }
        }),
    }
}

pub fn format_clock_time(value: &str) -> Result<String> {
    Ok(parse_timestamp(value)?.format("%H:%M").to_string())
}

pub fn format_meetings(meetings: &[MeetingRecord]) -> Result<String> {
    if meetings.is_empty() {
        return Ok(NO_MEETINGS.to_string());
    }

    let entries = meetings
        .iter()
        .map(|m| {
            Ok(format!(
                "# {} #\n{} - {}",
                m.title,
                format_clock_time(&m.start_date)?,
                format_clock_time(&m.end_date)?
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(entries.join("\n\n"))
}

pub fn format_birthday(birthday: &BirthdayRecord, today: NaiveDate) -> Result<String> {
    let date = parse_timestamp(&birthday.start_date)?.date();
    let days_left = (date - today).num_days();
    let header = if days_left > 0 {
        format!("# ⏳ In {days_left} day(s) ⏳ #")
    } else {
        BIRTHDAY_TODAY.to_string()
    };
    Ok(format!("{header}\n{}", birthday.title))
}

/// Writes exponents with an explicit sign and at least two digits
/// (`1e16` -> `1e+16`, `1e-7` -> `1e-07`).
fn normalize_exponent(raw: &str) -> String {
    match raw.split_once(['e', 'E']) {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
            Err(_) => raw.to_string(),
        },
        None => raw.to_string(),
    }
}

/// Renders a number with comma thousands separators, keeping a float's
/// shortest representation (`1000.0` -> `1,000.0`, `1000` -> `1,000`).
pub fn format_grouped(number: &serde_json::Number) -> String {
    let raw = if number.is_f64() {
        match number.as_f64() {
            Some(v) => format!("{v:?}"),
            None => number.to_string(),
        }
    } else {
        number.to_string()
    };
    if raw.contains(['e', 'E']) {
        return normalize_exponent(&raw);
    }

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn budget_expression(total: &serde_json::Number) -> String {
    format!("\\${}", format_grouped(total))
}
