//! Value-axis bounds for line charts.
//!
//! The range is centred on the first numeric data point so that the series
//! starts at the vertical middle of the chart, and padded until the tick
//! interval is representable at the requested precision.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

pub const DEFAULT_DECIMAL_PLACES: u32 = 2;
pub const DEFAULT_SPLIT_COUNT: u32 = 5;

/// Base diff rate, in tenths (1.2).
const BASE_RATE_TENTHS: u64 = 12;
/// Upper bound on rate increments before giving up on a degenerate span.
const MAX_RATE_STEPS: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub max: f64,
    pub min: f64,
}

impl AxisRange {
    pub fn midpoint(&self) -> f64 {
        (self.max + self.min) / 2.0
    }
}

/// Computes a symmetric `{max, min}` around the first numeric `field` value.
///
/// Non-numeric entries are skipped everywhere. Flat data (or a single
/// point) gets a half-span of `|first| / 6`; an empty dataset yields
/// `{0, 0}`.
#[instrument(level = "debug", skip(data))]
pub fn compute_axis_range(
    data: &[Value],
    field: &str,
    decimal_places: u32,
    split_count: u32,
) -> DomainResult<AxisRange> {
    let values: Vec<f64> = data
        .iter()
        .filter_map(|point| point.get(field).and_then(Value::as_f64))
        .collect();

    let first_value = values.first().copied().unwrap_or(0.0);
    let max_diff = values
        .iter()
        .map(|v| (v - first_value).abs())
        .fold(0.0_f64, f64::max);

    let half_span = if max_diff == 0.0 {
        first_value.abs() / 6.0
    } else {
        max_diff * compute_diff_rate(first_value, max_diff, decimal_places, split_count)?
    };
    debug!(first_value, max_diff, half_span, "axis range");

    Ok(AxisRange {
        max: first_value + half_span,
        min: first_value - half_span,
    })
}

/// Smallest rate in steps of 0.1, starting at 1.2, for which
/// `2 * max_diff * rate / split_count` reaches `10^-decimal_places`.
///
/// A zero `first_value` or `max_diff` short-circuits to 1.2.
#[instrument(level = "debug")]
pub fn compute_diff_rate(
    first_value: f64,
    max_diff: f64,
    decimal_places: u32,
    split_count: u32,
) -> DomainResult<f64> {
    if !first_value.is_finite() || !max_diff.is_finite() {
        return Err(DomainError::invalid_argument(format!(
            "axis values must be finite (first value {first_value}, max diff {max_diff})"
        )));
    }
    if split_count == 0 {
        return Err(DomainError::invalid_argument("split count must be positive"));
    }
    let base_rate = BASE_RATE_TENTHS as f64 / 10.0;
    if first_value == 0.0 || max_diff == 0.0 {
        return Ok(base_rate);
    }

    let span = max_diff.abs();
    let splits = f64::from(split_count);
    let min_tick = 10f64.powi(-(decimal_places.min(i32::MAX as u32) as i32));

    // Jump to just below the analytic answer; the loop settles the boundary.
    let estimate = (min_tick * splits / (2.0 * span) * 10.0).floor() - 1.0;
    let start = if estimate > BASE_RATE_TENTHS as f64 {
        estimate as u64
    } else {
        BASE_RATE_TENTHS
    };

    for tenths in start..start.saturating_add(MAX_RATE_STEPS) {
        let rate = tenths as f64 / 10.0;
        let max = first_value + span * rate;
        let min = first_value - span * rate;
        if (max - min) / splits >= min_tick {
            return Ok(rate);
        }
    }

    Err(DomainError::invalid_argument(format!(
        "span {span} around {first_value} too narrow for {decimal_places} decimal places"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_diff_rate_steps_once() {
        // 1.2: (1.034 - 0.986) / 5 = 0.0096 < 0.01, so one step up
        assert_eq!(compute_diff_rate(1.01, 0.02, 2, 5), Ok(1.3));
    }

    #[rstest]
    #[case(0.0, 0.02)]
    #[case(1.01, 0.0)]
    #[case(0.0, 0.0)]
    fn test_diff_rate_degenerate(#[case] first: f64, #[case] diff: f64) {
        assert_eq!(compute_diff_rate(first, diff, 2, 5), Ok(1.2));
    }

    #[test]
    fn test_diff_rate_wide_span_keeps_base() {
        assert_eq!(compute_diff_rate(100.0, 20.0, 2, 5), Ok(1.2));
    }

    #[test]
    fn test_diff_rate_tight_span_meets_min_tick() {
        let rate = compute_diff_rate(3.0, 0.0001, 2, 5).unwrap();
        // analytic boundary is 250.0; rounding may push it one step further
        assert!((249.9..=250.2).contains(&rate), "rate {rate}");
    }

    #[test]
    fn test_diff_rate_rejects_bad_input() {
        assert!(compute_diff_rate(f64::NAN, 1.0, 2, 5).is_err());
        assert!(compute_diff_rate(1.0, f64::INFINITY, 2, 5).is_err());
        assert!(compute_diff_rate(1.0, 1.0, 2, 0).is_err());
    }

    #[test]
    fn test_axis_range_prices() {
        let data = vec![
            json!({"price": 1.01}),
            json!({"price": 1.02}),
            json!({"price": 1.02}),
            json!({"price": 1.0}),
            json!({"price": 0.99}),
        ];
        let range = compute_axis_range(&data, "price", 2, 5).unwrap();
        assert!(close(range.max, 1.036), "max {}", range.max);
        assert!(close(range.min, 0.984), "min {}", range.min);
    }

    #[test]
    fn test_axis_range_skips_leading_non_numeric() {
        let data = vec![
            json!({"v": null}),
            json!({"v": "n/a"}),
            json!({"w": 3}),
            json!({"v": 10.0}),
            json!({"v": 14.0}),
        ];
        let range = compute_axis_range(&data, "v", 2, 5).unwrap();
        assert!(close(range.midpoint(), 10.0));
        assert!(close(range.max, 10.0 + 4.0 * 1.2));
    }

    #[rstest]
    #[case(json!([{"v": 12.0}]), 14.0, 10.0)]
    #[case(json!([{"v": 6}, {"v": 6}]), 7.0, 5.0)]
    #[case(json!([{"v": -6}]), -5.0, -7.0)]
    #[case(json!([]), 0.0, 0.0)]
    fn test_axis_range_flat(#[case] data: Value, #[case] max: f64, #[case] min: f64) {
        let data = data.as_array().cloned().unwrap_or_default();
        let range = compute_axis_range(&data, "v", 2, 5).unwrap();
        assert!(close(range.max, max) && close(range.min, min), "{range:?}");
    }
}
