//! Gap filling for sparse time series.
//!
//! Between two consecutive points the previous y value is repeated on a
//! fixed minute grid, so a line chart shows a flat step instead of a slope.
//! Example with a 5 minute grid: `[9:23, 9:32]` becomes
//! `[9:23, 9:25, 9:30, 9:32]`.

use chrono::{NaiveDateTime, TimeZone, Timelike, Utc};
use serde_json::{Map, Value};
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

pub const DEFAULT_INTERVAL_MINUTES: u32 = 5;

const MS_PER_MINUTE: i64 = 60_000;

/// Upper bound on fillers between two points (about 1.9 years at 1 minute).
pub const MAX_FILLERS_PER_GAP: i64 = 1_000_000;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Emits every input point (with `x_field` normalised to epoch milliseconds)
/// followed by filler points `{x_field, y_field}` carrying its y value.
///
/// Fillers sit on the `interval_minutes` grid strictly between a point and
/// its successor. An unaligned point first snaps to the next grid boundary
/// (minute of the hour divisible by the interval, seconds kept); later
/// fillers step by the interval. The last point gets no fillers.
#[instrument(level = "debug", skip(data))]
pub fn fill_time_series(
    data: &[Value],
    x_field: &str,
    y_field: &str,
    interval_minutes: u32,
) -> DomainResult<Vec<Value>> {
    if interval_minutes == 0 {
        return Err(DomainError::invalid_argument("fill interval must be positive"));
    }

    let times = data
        .iter()
        .map(|point| timestamp_of(point, x_field))
        .collect::<DomainResult<Vec<i64>>>()?;

    let mut filled = Vec::with_capacity(data.len());
    for (idx, point) in data.iter().enumerate() {
        let current = times[idx];
        filled.push(with_timestamp(point, x_field, current));

        let Some(&next) = times.get(idx + 1) else {
            continue;
        };
        let y = point.get(y_field).cloned().unwrap_or(Value::Null);
        let ticks = filler_ticks(current, next, interval_minutes)?;
        trace!(current, next, fillers = ticks.len(), "gap filled");

        filled.extend(ticks.into_iter().map(|tick| {
            let mut filler = Map::new();
            filler.insert(x_field.to_string(), Value::from(tick));
            filler.insert(y_field.to_string(), y.clone());
            Value::Object(filler)
        }));
    }

    Ok(filled)
}

/// Grid timestamps strictly between `current` and `next`.
///
/// Gaps needing more than [`MAX_FILLERS_PER_GAP`] ticks are rejected.
pub fn filler_ticks(current: i64, next: i64, interval_minutes: u32) -> DomainResult<Vec<i64>> {
    if interval_minutes == 0 {
        return Err(DomainError::invalid_argument("fill interval must be positive"));
    }
    let moment = Utc
        .timestamp_millis_opt(current)
        .single()
        .ok_or_else(|| DomainError::InvalidTimestamp {
            field: "x".to_string(),
            value: current.to_string(),
        })?;

    let step = i64::from(interval_minutes) * MS_PER_MINUTE;
    let remainder = moment.minute() % interval_minutes;
    let tick = if remainder == 0 {
        current + step
    } else {
        current + i64::from(interval_minutes - remainder) * MS_PER_MINUTE
    };

    if tick >= next {
        return Ok(Vec::new());
    }
    let count = next.saturating_sub(tick).saturating_sub(1) / step + 1;
    if count > MAX_FILLERS_PER_GAP {
        return Err(DomainError::invalid_argument(format!(
            "gap from {current} to {next} needs {count} fillers, limit is {MAX_FILLERS_PER_GAP}"
        )));
    }

    Ok((0..count).map(|i| tick + i * step).collect())
}

/// Reads `field` as epoch milliseconds.
///
/// Accepts numbers, numeric strings, RFC 3339 and `YYYY-MM-DD HH:MM[:SS]`
/// (UTC).
pub fn timestamp_of(point: &Value, field: &str) -> DomainResult<i64> {
    let raw = point.get(field).unwrap_or(&Value::Null);
    parse_timestamp(raw).ok_or_else(|| DomainError::InvalidTimestamp {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

pub fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<i64> {
    if let Ok(ms) = s.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(moment) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(moment.timestamp_millis());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn with_timestamp(point: &Value, x_field: &str, millis: i64) -> Value {
    let mut point = point.clone();
    if let Value::Object(map) = &mut point {
        map.insert(x_field.to_string(), Value::from(millis));
    }
    point
}
