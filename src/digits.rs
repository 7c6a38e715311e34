// 🔢 Shared digit conventions
// Thousands grouping, fixed-point rendering, trailing ".0" suppression
//
// Every component renders numbers through these helpers so that
// "1,234.50" means the same thing in currency, number and file-size text.

/// Largest number of fractional digits any helper renders
///
/// Requests above this are clamped.
pub const MAX_FRACTION_DIGITS: u32 = 20;

// 2^53: from here on an f64 no longer holds every integer
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Round half away from zero to `digits` fractional digits
///
/// # Examples:
/// ```
/// use taiwan_locale::digits::round_to;
/// assert_eq!(round_to(68.182, 0), 68.0);
/// assert_eq!(round_to(2.25, 1), 2.3);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits.min(MAX_FRACTION_DIGITS) as i32);
    let scaled = (value * scale).round();
    if !scaled.is_finite() {
        return value;
    }
    scaled / scale
}

/// Render with exactly `digits` fractional digits, no grouping
///
/// Rounds half away from zero (1.25 → "1.3"), unlike `format!("{:.1}")`
/// which rounds half to even. `digits` is clamped to [`MAX_FRACTION_DIGITS`].
pub fn fixed(value: f64, digits: u32) -> String {
    let (negative, int_part, frac_part) = split_fixed(value, digits);
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Render with exactly `digits` fractional digits and comma thousands grouping
///
/// # Examples:
/// ```
/// use taiwan_locale::digits::grouped;
/// assert_eq!(grouped(1234567.0, 0), "1,234,567");
/// assert_eq!(grouped(1234.5, 2), "1,234.50");
/// ```
pub fn grouped(value: f64, digits: u32) -> String {
    let (negative, int_part, frac_part) = split_fixed(value, digits);
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Insert a comma every three digits from the right
pub fn group_thousands(int_digits: &str) -> String {
    let len = int_digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Drop a trailing ".0" ("2.0" → "2", "2.5" stays)
pub fn trim_point_zero(text: &str) -> String {
    text.strip_suffix(".0").unwrap_or(text).to_string()
}

/// One decimal, trailing ".0" suppressed
pub fn compact_decimal(value: f64) -> String {
    trim_point_zero(&fixed(value, 1))
}

fn split_fixed(value: f64, digits: u32) -> (bool, String, String) {
    let digits = digits.min(MAX_FRACTION_DIGITS);
    if !value.is_finite() {
        return (false, "0".to_string(), "0".repeat(digits as usize));
    }

    let scale = 10i128.pow(digits);
    let scaled = (value * scale as f64).round();

    if scaled.abs() >= EXACT_INTEGER_LIMIT {
        // Scaling no longer lands on an exact integer: print the exact
        // decimal expansion of the float instead
        let text = format!("{:.*}", digits as usize, value.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        return (value < 0.0, int_part.to_string(), frac_part.to_string());
    }

    let scaled = scaled as i128;
    let negative = scaled < 0;
    let magnitude = scaled.abs();

    let int_part = (magnitude / scale).to_string();
    let frac_part = if digits > 0 {
        format!("{:0width$}", magnitude % scale, width = digits as usize)
    } else {
        String::new()
    };

    (negative, int_part, frac_part)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_fixed_rounds_half_away_from_zero() {
        assert_eq!(fixed(1.25, 1), "1.3");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(-2.5, 0), "-3");
        assert_eq!(fixed(0.5, 2), "0.50");
    }

    #[test]
    fn test_grouped_with_decimals() {
        assert_eq!(grouped(1431.64, 2), "1,431.64");
        assert_eq!(grouped(1000000.0, 0), "1,000,000");
        assert_eq!(grouped(-1234.0, 0), "-1,234");
    }

    #[test]
    fn test_compact_decimal_trims_point_zero() {
        assert_eq!(compact_decimal(2.0), "2");
        assert_eq!(compact_decimal(2.5), "2.5");
        assert_eq!(compact_decimal(1.04), "1");
    }

    #[test]
    fn test_non_finite_renders_zero() {
        assert_eq!(fixed(f64::NAN, 1), "0.0");
        assert_eq!(grouped(f64::INFINITY, 0), "0");
    }

    #[test]
    fn test_fraction_digits_are_clamped() {
        let zeros = "0".repeat(MAX_FRACTION_DIGITS as usize);
        assert_eq!(fixed(50.0, 39), format!("50.{}", zeros));
        assert_eq!(fixed(50.0, u32::MAX), format!("50.{}", zeros));
        assert_eq!(fixed(f64::NAN, 400), format!("0.{}", zeros));
        assert_eq!(round_to(2.25, 400), 2.25);
    }

    #[test]
    fn test_large_magnitudes_keep_their_digits() {
        let zeros = "0".repeat(20);
        assert_eq!(fixed(1e10, 30), format!("10000000000.{}", zeros));
        assert_eq!(fixed(-1e10, 20), format!("-10000000000.{}", zeros));
        assert_eq!(grouped(1e20, 2), "100,000,000,000,000,000,000.00");
        let huge = fixed(1e40, 0);
        assert_eq!(huge.len(), 41);
        assert!(huge.starts_with("10000000000000000303"));
    }
}
