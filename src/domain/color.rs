//! Hex colour to CSS `rgba()` conversion.

use regex::Regex;

use crate::domain::error::{DomainError, DomainResult};

/// Converts `#rgb` / `#rrggbb` (hash optional, case-insensitive) plus an
/// alpha in `[0, 1]` to `rgba(r, g, b, a)`.
///
/// Whole alphas print without decimals, others with at most two.
///
/// ```
/// use utilkit::domain::color::hex_to_rgba;
///
/// assert_eq!(hex_to_rgba("#f00", 1.0).unwrap(), "rgba(255, 0, 0, 1)");
/// assert_eq!(hex_to_rgba("00FF00", 0.8).unwrap(), "rgba(0, 255, 0, 0.8)");
/// ```
pub fn hex_to_rgba(hex: &str, alpha: f64) -> DomainResult<String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex).to_ascii_lowercase();

    let re = Regex::new(r"^[0-9a-f]+$").map_err(|e| DomainError::InvalidArgument(e.to_string()))?;
    if !re.is_match(&digits) {
        return Err(invalid(hex, "invalid hex character(s)"));
    }

    let full: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits,
        _ => return Err(invalid(hex, "hex must be 3 or 6 characters long")),
    };

    if alpha.is_nan() {
        return Err(invalid(hex, "alpha must be a valid number"));
    }
    if !(0.0..=1.0).contains(&alpha) {
        return Err(invalid(hex, "alpha must be between 0 and 1"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&full[range], 16).map_err(|e| invalid(hex, &e.to_string()))
    };
    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);

    Ok(format!("rgba({r}, {g}, {b}, {})", format_alpha(alpha)))
}

fn format_alpha(alpha: f64) -> String {
    if alpha.fract() == 0.0 {
        return format!("{alpha:.0}");
    }
    let fixed = format!("{alpha:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn invalid(input: &str, reason: &str) -> DomainError {
    DomainError::InvalidColor {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
