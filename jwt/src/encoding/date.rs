//! Conversion between registered date claims on the wire and [OffsetDateTime]
//!
//! Every value goes through its `seconds.micros` text before becoming an instant, and instants go
//! back on the wire as that same text. An `f64` holds neither far-future nor some present-day
//! microseconds exactly, e.g. `32503680000.123457`.

use time::OffsetDateTime;

use crate::prelude::*;

const MICROS_PER_SECOND: i128 = 1_000_000;

/// Reads a date claim as found in a decoded token
///
/// Accepts integers, floats and numeric strings (`"1613938511"`, `"1613938511.017448"`).
///
/// # Errors
/// [InvalidTokenStructure::DateIsNotParseable] when the value is not numeric or out of range
pub fn convert_to_date(value: &ClaimValue) -> RustyJwtResult<OffsetDateTime> {
    let timestamp = match value {
        ClaimValue::Integer(i) => i.to_string(),
        ClaimValue::Float(f) if f.is_finite() => float_text(*f),
        ClaimValue::Decimal(d) if parse_fixed_point(d).is_some() => d.clone(),
        ClaimValue::Decimal(d) => match d.parse::<f64>() {
            Ok(f) if f.is_finite() => float_text(f),
            _ => d.clone(),
        },
        ClaimValue::String(s) => s.clone(),
        ClaimValue::Timestamp(t) => return Ok(*t),
        other => return Err(not_parseable(&render(other))),
    };
    parse_fixed_point(&timestamp)
        .and_then(|micros| OffsetDateTime::from_unix_timestamp_nanos(micros * 1_000).ok())
        .ok_or_else(|| not_parseable(&timestamp))
}

/// Renders an instant as `seconds.micros`, always with 6 fractional digits
pub fn fixed_point(at: &OffsetDateTime) -> String {
    let micros = at.unix_timestamp_nanos() / 1_000;
    let sign = if micros < 0 { "-" } else { "" };
    let micros = micros.unsigned_abs();
    let per_second = MICROS_PER_SECOND.unsigned_abs();
    format!("{sign}{}.{:06}", micros / per_second, micros % per_second)
}

/// Wire value of a date claim: integer seconds when there is no sub-second part, a number written
/// with its 6 fractional digits otherwise
pub fn microsecond_value(at: &OffsetDateTime) -> ClaimValue {
    let micros = at.unix_timestamp_nanos() / 1_000;
    if micros % MICROS_PER_SECOND == 0 {
        return ClaimValue::Integer(at.unix_timestamp());
    }
    ClaimValue::Decimal(fixed_point(at))
}

/// Wire value of a date claim as whole seconds, dropping any fraction
pub fn unix_timestamp_value(at: &OffsetDateTime) -> ClaimValue {
    ClaimValue::Integer(at.unix_timestamp())
}

/// Drops anything finer than a microsecond, which is all the wire format can carry
pub fn truncate_to_micros(at: OffsetDateTime) -> OffsetDateTime {
    let micros = at.unix_timestamp_nanos() / 1_000;
    OffsetDateTime::from_unix_timestamp_nanos(micros * 1_000).unwrap_or(at)
}

/// Parses `[-]seconds[.fraction]` with at most 6 fractional digits into microseconds
fn parse_fixed_point(value: &str) -> Option<i128> {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (seconds, fraction) = match unsigned.split_once('.') {
        Some((_, "")) => return None,
        Some((seconds, fraction)) => (seconds, fraction),
        None => (unsigned, ""),
    };
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if seconds.is_empty() || fraction.len() > 6 || !is_digits(seconds) || !is_digits(fraction) {
        return None;
    }
    let seconds = seconds.parse::<i128>().ok()?;
    let fraction = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<6}").parse::<i128>().ok()?
    };
    let micros = seconds.checked_mul(MICROS_PER_SECOND)?.checked_add(fraction)?;
    Some(if negative { -micros } else { micros })
}

/// Shortest text giving back `f`, rounded to the microsecond when it has more digits
fn float_text(f: f64) -> String {
    let shortest = f.to_string();
    match shortest.split_once('.') {
        Some((_, fraction)) if fraction.len() > 6 => format!("{f:.6}"),
        _ => shortest,
    }
}

fn render(value: &ClaimValue) -> String {
    value
        .to_json()
        .map(|v| v.to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}

fn not_parseable(value: &str) -> RustyJwtError {
    InvalidTokenStructure::DateIsNotParseable(value.to_string()).into()
}
