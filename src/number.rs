// 🧮 Number - general numeral formatting
// Compact Chinese units, ordinals, percentages, file sizes, distances,
// and Arabic ↔ Chinese numerals.

use crate::config::ChineseNumberOptions;
use crate::digits::{compact_decimal, fixed, grouped};
use crate::error::{LocaleError, Result};

// ============================================================================
// COMPACT UNITS
// ============================================================================

/// Display units, descending
const DISPLAY_UNITS: [(f64, &str); 3] = [(1e8, "億"), (1e4, "萬"), (1e3, "千")];

/// Format a number, optionally with 億/萬/千
///
/// # Examples:
/// ```
/// use taiwan_locale::config::ChineseNumberOptions;
/// use taiwan_locale::number::format_chinese_number;
///
/// let units = ChineseNumberOptions { use_chinese_units: true, ..Default::default() };
/// assert_eq!(format_chinese_number(12345.0, units), "1.2萬");
/// assert_eq!(format_chinese_number(12345.0, ChineseNumberOptions::default()), "12,345");
/// ```
pub fn format_chinese_number(value: f64, options: ChineseNumberOptions) -> String {
    if options.wants_units() {
        let magnitude = value.abs();
        if let Some((unit, glyph)) = DISPLAY_UNITS.iter().find(|(unit, _)| magnitude >= *unit) {
            let digits = if options.decimals == 0 { 1 } else { options.decimals };
            return format!("{}{}", fixed(value / unit, digits), glyph);
        }
    }

    grouped(value, options.decimals)
}

// ============================================================================
// CHINESE NUMERALS (0–9999)
// ============================================================================

const DIGIT_GLYPHS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Positional units for thousands, hundreds, tens, ones
const PLACE_UNITS: [&str; 4] = ["千", "百", "十", ""];

pub const NUMERAL_MIN: i64 = 0;
pub const NUMERAL_MAX: i64 = 9999;

/// Integer 0–9999 to Chinese numerals
///
/// Internal zeros collapse to one 零, trailing zeros are dropped and 10–19
/// start with 十 rather than 一十.
///
/// # Examples:
/// ```
/// use taiwan_locale::number::to_chinese_numeral;
/// assert_eq!(to_chinese_numeral(10).unwrap(), "十");
/// assert_eq!(to_chinese_numeral(1001).unwrap(), "一千零一");
/// assert!(to_chinese_numeral(10000).is_err());
/// ```
pub fn to_chinese_numeral(value: i64) -> Result<String> {
    if !(NUMERAL_MIN..=NUMERAL_MAX).contains(&value) {
        return Err(LocaleError::OutOfRange {
            value,
            min: NUMERAL_MIN,
            max: NUMERAL_MAX,
        });
    }
    if value == 0 {
        return Ok(DIGIT_GLYPHS[0].to_string());
    }

    let places = [value / 1000, value / 100 % 10, value / 10 % 10, value % 10];
    let mut out = String::new();
    let mut prev_zero = false;

    for (place, &digit) in places.iter().enumerate() {
        if digit == 0 {
            prev_zero = !out.is_empty();
            continue;
        }

        if prev_zero {
            out.push(DIGIT_GLYPHS[0]);
            prev_zero = false;
        }

        let leading_ten = place == 2 && digit == 1 && out.is_empty();
        if !leading_ten {
            out.push(DIGIT_GLYPHS[digit as usize]);
        }
        out.push_str(PLACE_UNITS[place]);
    }

    Ok(out)
}

/// Strict inverse of to_chinese_numeral
pub fn from_chinese_numeral(text: &str) -> Option<u32> {
    let value = parse_chinese_number(text)?;
    if value.fract() != 0.0 || !(NUMERAL_MIN as f64..=NUMERAL_MAX as f64).contains(&value) {
        return None;
    }
    Some(value as u32)
}

// ============================================================================
// PARSING
// ============================================================================

/// Units split on, descending. 千萬/百萬/十萬 are not separate rows: the
/// 萬 split hands "三百二十" to the 千/百/十 rows as one coefficient, so
/// "三百二十萬" is 3,200,000 rather than 300 + 20萬.
const PARSE_UNITS: [(&str, f64); 5] = [
    ("億", 1e8),
    ("萬", 1e4),
    ("千", 1e3),
    ("百", 1e2),
    ("十", 1e1),
];

/// Parse Chinese / mixed numeral text ("兩千三百", "3.5萬", "一億二千萬")
///
/// Returns None when nothing is recognized, so that "零" (Some(0.0)) and
/// garbage stay distinguishable.
pub fn parse_chinese_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '，')
        .map(|c| match c {
            '拾' => '十',
            '佰' => '百',
            '仟' => '千',
            '万' => '萬',
            '亿' => '億',
            other => other,
        })
        .collect();

    let (negative, body) = match cleaned.strip_prefix('-').or_else(|| cleaned.strip_prefix('負')) {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    if body.is_empty() {
        tracing::debug!(input = %text, "empty numeral text");
        return None;
    }

    match parse_with_units(body, &PARSE_UNITS) {
        Some(value) if negative => Some(-value),
        Some(value) => Some(value),
        None => {
            tracing::debug!(input = %text, "rejected numeral text");
            None
        }
    }
}

fn parse_with_units(text: &str, units: &[(&str, f64)]) -> Option<f64> {
    for (i, (glyph, unit)) in units.iter().enumerate() {
        let Some(pos) = text.find(glyph) else {
            continue;
        };

        let smaller = &units[i + 1..];
        let left = &text[..pos];
        let right = &text[pos + glyph.len()..];

        let coefficient = if left.is_empty() {
            1.0
        } else {
            parse_with_units(left, smaller)?
        };
        let rest = if right.is_empty() {
            0.0
        } else {
            parse_with_units(right, smaller)?
        };

        return Some(coefficient * unit + rest);
    }

    parse_digits(text)
}

/// Un-prefixed digits: Arabic, Chinese or financial, read positionally
fn parse_digits(text: &str) -> Option<f64> {
    let mut ascii = String::with_capacity(text.len());
    for ch in text.chars() {
        let digit = match ch {
            '0'..='9' | '.' => ch,
            '零' | '〇' => '0',
            '一' | '壹' => '1',
            '二' | '兩' | '貳' => '2',
            '三' | '參' => '3',
            '四' | '肆' => '4',
            '五' | '伍' => '5',
            '六' | '陸' => '6',
            '七' | '柒' => '7',
            '八' | '捌' => '8',
            '九' | '玖' => '9',
            _ => return None,
        };
        ascii.push(digit);
    }

    if ascii.is_empty() || ascii.starts_with('.') || ascii.ends_with('.') {
        return None;
    }
    ascii.parse::<f64>().ok()
}

// ============================================================================
// MISC DISPLAY
// ============================================================================

/// "第3"
pub fn format_ordinal(n: i64) -> String {
    format!("第{}", n)
}

/// "12.5%"; ratios (0.125) are scaled by 100 first
pub fn format_percentage(value: f64, is_ratio: bool, decimals: u32) -> String {
    let percent = if is_ratio { value * 100.0 } else { value };
    format!("{}%", fixed(percent, decimals))
}

/// part/total as a percentage; a zero total renders 0
pub fn format_ratio(part: f64, total: f64, decimals: u32) -> String {
    if total == 0.0 {
        return format_percentage(0.0, false, decimals);
    }
    format_percentage(part / total, true, decimals)
}

/// "4.5/5分"
pub fn format_score(score: f64, max: f64) -> String {
    format!("{}/{}分", compact_decimal(score), compact_decimal(max))
}

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Binary units, capped at TB; bytes shown as an integer
///
/// # Examples:
/// ```
/// use taiwan_locale::number::format_file_size;
/// assert_eq!(format_file_size(512), "512 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, SIZE_UNITS[0])
    } else {
        format!("{} {}", fixed(size, 1), SIZE_UNITS[unit_index])
    }
}

/// "850公尺" below 1 km, "1.5公里" from there
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}公尺", fixed(meters, 0))
    } else {
        format!("{}公里", compact_decimal(meters / 1000.0))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn units(decimals: u32) -> ChineseNumberOptions {
        ChineseNumberOptions {
            decimals,
            use_chinese_units: true,
            compact: false,
        }
    }

    #[test]
    fn test_format_with_units_descending() {
        assert_eq!(format_chinese_number(250_000_000.0, units(0)), "2.5億");
        assert_eq!(format_chinese_number(12_345.0, units(0)), "1.2萬");
        assert_eq!(format_chinese_number(10_000.0, units(0)), "1.0萬");
        assert_eq!(format_chinese_number(3_500.0, units(0)), "3.5千");
        assert_eq!(format_chinese_number(12_345.0, units(2)), "1.23萬");
    }

    #[test]
    fn test_format_compact_flag_also_uses_units() {
        let opts = ChineseNumberOptions {
            compact: true,
            ..Default::default()
        };
        assert_eq!(format_chinese_number(20_000.0, opts), "2.0萬");
    }

    #[test]
    fn test_format_falls_through_below_thousand() {
        assert_eq!(format_chinese_number(999.0, units(0)), "999");
        assert_eq!(format_chinese_number(999.456, units(2)), "999.46");
    }

    #[test]
    fn test_format_grouped_without_units() {
        let opts = ChineseNumberOptions {
            decimals: 2,
            ..Default::default()
        };
        assert_eq!(format_chinese_number(1234567.891, opts), "1,234,567.89");
        assert_eq!(format_chinese_number(1234567.0, ChineseNumberOptions::default()), "1,234,567");
    }

    #[test]
    fn test_chinese_numeral_boundaries() {
        assert_eq!(to_chinese_numeral(0).unwrap(), "零");
        assert_eq!(to_chinese_numeral(1).unwrap(), "一");
        assert_eq!(to_chinese_numeral(10).unwrap(), "十");
        assert_eq!(to_chinese_numeral(11).unwrap(), "十一");
        assert_eq!(to_chinese_numeral(19).unwrap(), "十九");
        assert_eq!(to_chinese_numeral(20).unwrap(), "二十");
        assert_eq!(to_chinese_numeral(100).unwrap(), "一百");
        assert_eq!(to_chinese_numeral(9999).unwrap(), "九千九百九十九");
    }

    #[test]
    fn test_chinese_numeral_zero_collapsing() {
        assert_eq!(to_chinese_numeral(101).unwrap(), "一百零一");
        assert_eq!(to_chinese_numeral(110).unwrap(), "一百一十");
        assert_eq!(to_chinese_numeral(1001).unwrap(), "一千零一");
        assert_eq!(to_chinese_numeral(1010).unwrap(), "一千零一十");
        assert_eq!(to_chinese_numeral(1100).unwrap(), "一千一百");
        assert_eq!(to_chinese_numeral(2000).unwrap(), "二千");
    }

    #[test]
    fn test_chinese_numeral_out_of_range() {
        assert_eq!(
            to_chinese_numeral(10000),
            Err(LocaleError::OutOfRange { value: 10000, min: 0, max: 9999 })
        );
        assert!(to_chinese_numeral(-1).is_err());
    }

    #[test]
    fn test_parse_chinese_number_composites() {
        assert_eq!(parse_chinese_number("兩千三百"), Some(2300.0));
        assert_eq!(parse_chinese_number("十五"), Some(15.0));
        assert_eq!(parse_chinese_number("一千零五"), Some(1005.0));
        assert_eq!(parse_chinese_number("三百二十萬"), Some(3_200_000.0));
        assert_eq!(parse_chinese_number("二十萬"), Some(200_000.0));
        assert_eq!(parse_chinese_number("一億二千萬"), Some(120_000_000.0));
        assert_eq!(parse_chinese_number("一萬二千"), Some(12_000.0));
    }

    #[test]
    fn test_parse_chinese_number_mixed_digits() {
        assert_eq!(parse_chinese_number("3.5萬"), Some(35_000.0));
        assert_eq!(parse_chinese_number("1.5千萬"), Some(15_000_000.0));
        assert_eq!(parse_chinese_number("1,234"), Some(1234.0));
        assert_eq!(parse_chinese_number("2億3000萬"), Some(230_000_000.0));
        assert_eq!(parse_chinese_number("壹仟貳佰參拾肆"), Some(1234.0));
    }

    #[test]
    fn test_parse_chinese_number_zero_is_a_value() {
        assert_eq!(parse_chinese_number("零"), Some(0.0));
        assert_eq!(parse_chinese_number("0"), Some(0.0));
    }

    #[test]
    fn test_parse_chinese_number_rejects() {
        assert_eq!(parse_chinese_number(""), None);
        assert_eq!(parse_chinese_number("   "), None);
        assert_eq!(parse_chinese_number("abc"), None);
        assert_eq!(parse_chinese_number("三個"), None);
        assert_eq!(parse_chinese_number("."), None);
    }

    #[test]
    fn test_from_chinese_numeral() {
        assert_eq!(from_chinese_numeral("一千零一十"), Some(1010));
        assert_eq!(from_chinese_numeral("十"), Some(10));
        assert_eq!(from_chinese_numeral("一萬"), None);
        assert_eq!(from_chinese_numeral("3.5"), None);
    }

    #[test]
    fn test_format_ordinal() {
        assert_eq!(format_ordinal(1), "第1");
        assert_eq!(format_ordinal(12), "第12");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.125, true, 1), "12.5%");
        assert_eq!(format_percentage(12.5, false, 0), "13%");
        assert_eq!(format_percentage(50.0, false, 2), "50.00%");
    }

    #[test]
    fn test_oversized_decimals_stay_bounded() {
        let zeros = "0".repeat(20);
        assert_eq!(format_percentage(50.0, false, 39), format!("50.{}%", zeros));
        assert_eq!(format_percentage(1e10, false, 30), format!("10000000000.{}%", zeros));
        assert_eq!(format_ratio(1.0, 2.0, 64), format!("50.{}%", zeros));

        let text = format_chinese_number(12345.0, units(40));
        assert!(text.starts_with("1.2345"));
        assert!(text.ends_with('萬'));
    }

    #[test]
    fn test_format_ratio_and_score() {
        assert_eq!(format_ratio(1.0, 4.0, 0), "25%");
        assert_eq!(format_ratio(1.0, 0.0, 1), "0.0%");
        assert_eq!(format_score(4.5, 5.0), "4.5/5分");
        assert_eq!(format_score(85.0, 100.0), "85/100分");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024u64.pow(4)), "3.0 TB");
        assert_eq!(format_file_size(2048 * 1024u64.pow(4)), "2048.0 TB");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(850.0), "850公尺");
        assert_eq!(format_distance(1000.0), "1公里");
        assert_eq!(format_distance(1500.0), "1.5公里");
        assert_eq!(format_distance(12_340.0), "12.3公里");
    }
}
