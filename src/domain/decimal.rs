//! Number formatting for axis ticks and tooltips.
//!
//! Rounding is decimal half-up on the shortest representation of the
//! value, so `1.005` at two places is `1.01`, not the binary `1.00`.

use std::iter;
use std::str::FromStr;

use serde_json::Value;
use tracing::trace;

use crate::domain::error::DomainError;

pub const DEFAULT_FORMAT_PLACES: u32 = 3;
pub const DEFAULT_PLACEHOLDER: &str = "--";

/// Largest precision honoured; larger requests are clamped.
pub const MAX_FIXED_PLACES: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    /// Round half-up to `value` decimal places.
    ToDecimalPlaces,
}

/// One arithmetic step applied before formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operation {
    pub operator: Operator,
    pub value: f64,
}

impl Operation {
    pub fn new(operator: Operator, value: f64) -> Self {
        Self { operator, value }
    }

    fn apply(&self, input: f64) -> f64 {
        match self.operator {
            Operator::Add => input + self.value,
            Operator::Sub => input - self.value,
            Operator::Mul => input * self.value,
            Operator::Div => input / self.value,
            Operator::ToDecimalPlaces => {
                let places = self.value.max(0.0) as u32;
                to_fixed(input, places).parse().unwrap_or(input)
            }
        }
    }
}

/// Parses `<op>:<number>` with op one of `add`, `sub`, `mul`, `div`, `places`.
impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, number) = s
            .split_once(':')
            .ok_or_else(|| DomainError::invalid_argument(format!("operation '{s}' is not <op>:<number>")))?;
        let operator = match name.trim() {
            "add" => Operator::Add,
            "sub" => Operator::Sub,
            "mul" => Operator::Mul,
            "div" => Operator::Div,
            "places" => Operator::ToDecimalPlaces,
            other => return Err(DomainError::invalid_argument(format!("unknown operator '{other}'"))),
        };
        let value = number
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DomainError::invalid_argument(format!("operand '{number}' is not a number")))?;
        Ok(Self::new(operator, value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Fixed precision; `None` prints the value as is
    pub decimal_places: Option<u32>,
    pub prefix: String,
    pub suffix: String,
    /// Output for missing or non-numeric input
    pub default_value: String,
    /// Applied in order before formatting
    pub operations: Vec<Operation>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimal_places: Some(DEFAULT_FORMAT_PLACES),
            prefix: String::new(),
            suffix: String::new(),
            default_value: DEFAULT_PLACEHOLDER.to_string(),
            operations: Vec::new(),
        }
    }
}

/// Formats a JSON number or numeric string as `prefix + digits + suffix`.
///
/// `null`, empty or non-numeric strings and non-numbers give
/// `options.default_value`.
///
/// ```
/// use utilkit::domain::decimal::{format, FormatOptions, Operation, Operator};
/// use serde_json::json;
///
/// let percent = FormatOptions {
///     decimal_places: Some(2),
///     suffix: "%".into(),
///     operations: vec![Operation::new(Operator::Mul, 100.0)],
///     ..FormatOptions::default()
/// };
/// assert_eq!(format(&json!(0.012), &percent), "1.20%");
/// assert_eq!(format(&json!(null), &percent), "--");
/// ```
pub fn format(value: &Value, options: &FormatOptions) -> String {
    match numeric_value(value) {
        Some(number) => format_number(number, options),
        None => options.default_value.clone(),
    }
}

pub fn format_number(value: f64, options: &FormatOptions) -> String {
    if !value.is_finite() {
        return options.default_value.clone();
    }
    let result = options.operations.iter().fold(value, |acc, op| op.apply(acc));
    if !result.is_finite() {
        trace!(value, "operations produced a non-finite result");
        return options.default_value.clone();
    }

    let digits = match options.decimal_places {
        Some(places) => to_fixed(result, places),
        None => shortest(result),
    };
    format!("{}{}{}", options.prefix, digits, options.suffix)
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn shortest(value: f64) -> String {
    // no "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Half-up rounding of the shortest decimal representation of `value`.
fn to_fixed(value: f64, places: u32) -> String {
    let places = places.min(MAX_FIXED_PLACES) as usize;
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    let round_up = frac_part.as_bytes().get(places).is_some_and(|&d| d >= b'5');
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            int_len += 1;
        }
    }

    let negative = value < 0.0 && digits.iter().any(|&d| d != 0);
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|&d| char::from(b'0' + d)));
    if places > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| char::from(b'0' + d)));
    }
    out
}
