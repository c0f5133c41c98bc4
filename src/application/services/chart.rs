//! Chart service: axis ranges, gap filling and option merging with
//! configured defaults

use serde_json::Value;
use tracing::{info, instrument};

use crate::application::ApplicationResult;
use crate::config::ChartSettings;
use crate::domain::{self, color, decimal, object, AxisRange, FormatOptions};

#[derive(Debug, Clone, Default)]
pub struct ChartService {
    settings: ChartSettings,
}

impl ChartService {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Axis range for `field`; `None` arguments fall back to the settings.
    #[instrument(level = "debug", skip(self, data))]
    pub fn axis_range(
        &self,
        data: &[Value],
        field: &str,
        decimal_places: Option<u32>,
        split_count: Option<u32>,
    ) -> ApplicationResult<AxisRange> {
        let range = domain::compute_axis_range(
            data,
            field,
            decimal_places.unwrap_or(self.settings.decimal_places),
            split_count.unwrap_or(self.settings.split_count),
        )?;
        info!(max = range.max, min = range.min, "axis range computed");
        Ok(range)
    }

    #[instrument(level = "debug", skip(self, data))]
    pub fn fill(
        &self,
        data: &[Value],
        x_field: &str,
        y_field: &str,
        interval_minutes: Option<u32>,
    ) -> ApplicationResult<Vec<Value>> {
        let interval = interval_minutes.unwrap_or(self.settings.interval_minutes);
        let filled = domain::fill_time_series(data, x_field, y_field, interval)?;
        info!(
            input = data.len(),
            output = filled.len(),
            interval,
            "time series filled"
        );
        Ok(filled)
    }

    pub fn merge(&self, defaults: Value, overrides: Value) -> Value {
        object::merge_options(defaults, overrides)
    }

    /// Drops empty option entries (`null`, `""`, `[]`, `{}`) from an object,
    /// or from every object of an array. Other values pass through.
    pub fn compact(&self, options: Value) -> Value {
        let zero_values = object::default_zero_values();
        let compact_one = |value: Value| match value {
            Value::Object(map) => Value::Object(object::remove_zero_value_keys(&map, &zero_values)),
            other => other,
        };
        match options {
            Value::Array(items) => Value::Array(items.into_iter().map(compact_one).collect()),
            other => compact_one(other),
        }
    }

    pub fn rgba(&self, hex: &str, alpha: f64) -> ApplicationResult<String> {
        Ok(color::hex_to_rgba(hex, alpha)?)
    }

    /// Tick or tooltip label for `value`; non-numeric input yields the
    /// placeholder from `options`.
    #[instrument(level = "debug", skip(self))]
    pub fn label(&self, value: &Value, options: &FormatOptions) -> String {
        decimal::format(value, options)
    }

    /// Selectable years for a period picker, ending at the current year
    /// unless `end` is given.
    pub fn years(&self, start: i32, end: Option<i32>) -> ApplicationResult<Vec<i32>> {
        Ok(domain::range_of_years(start, end)?)
    }
}
