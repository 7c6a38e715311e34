// 💰 Currency - New Taiwan Dollar formatting & parsing
//
// Three renderings of the same amount:
// - Standard:  "NT$ 1,234" / "1,234.00 TWD"
// - Compact:   "NT$ 2.5千萬" (largest unit ≤ amount)
// - Formal:    "壹仟貳佰參拾肆元整" (checks, invoices)

use crate::config::TwdFormatOptions;
use crate::digits::{compact_decimal, grouped, round_to};
use crate::error::{LocaleError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const SYMBOL_PREFIX: &str = "NT$ ";
pub const CODE_SUFFIX: &str = " TWD";

/// Compact notation never applies below this amount
pub const COMPACT_THRESHOLD: f64 = 10_000.0;

// ============================================================================
// COMPACT MAGNITUDE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompactUnit {
    Yi,      // 億 = 1e8
    QianWan, // 千萬 = 1e7
    BaiWan,  // 百萬 = 1e6
    ShiWan,  // 十萬 = 1e5
    Wan,     // 萬 = 1e4
}

/// Priority order: largest first. Selection and parsing both walk this table.
pub const COMPACT_UNITS: [CompactUnit; 5] = [
    CompactUnit::Yi,
    CompactUnit::QianWan,
    CompactUnit::BaiWan,
    CompactUnit::ShiWan,
    CompactUnit::Wan,
];

impl CompactUnit {
    pub fn value(&self) -> f64 {
        match self {
            CompactUnit::Yi => 1e8,
            CompactUnit::QianWan => 1e7,
            CompactUnit::BaiWan => 1e6,
            CompactUnit::ShiWan => 1e5,
            CompactUnit::Wan => 1e4,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            CompactUnit::Yi => "億",
            CompactUnit::QianWan => "千萬",
            CompactUnit::BaiWan => "百萬",
            CompactUnit::ShiWan => "十萬",
            CompactUnit::Wan => "萬",
        }
    }
}

/// An amount tagged with the unit it is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompactMagnitude {
    pub raw: f64,
    pub unit: Option<CompactUnit>,
}

impl CompactMagnitude {
    /// `raw / unit` rounded to 1 decimal (raw itself when no unit applies)
    pub fn coefficient(&self) -> f64 {
        match self.unit {
            Some(unit) => round_to(self.raw / unit.value(), 1),
            None => self.raw,
        }
    }

    /// "2.5千萬", "3萬"; None when no unit applies
    pub fn render(&self) -> Option<String> {
        let unit = self.unit?;
        Some(format!("{}{}", compact_decimal(self.raw / unit.value()), unit.glyph()))
    }
}

/// Select the largest unit ≤ amount
///
/// # Examples:
/// ```
/// use taiwan_locale::currency::{compact_magnitude, CompactUnit};
/// assert_eq!(compact_magnitude(25_000_000.0).unit, Some(CompactUnit::QianWan));
/// assert_eq!(compact_magnitude(9_999.0).unit, None);
/// ```
pub fn compact_magnitude(amount: f64) -> CompactMagnitude {
    let unit = COMPACT_UNITS
        .iter()
        .copied()
        .find(|unit| amount >= unit.value());

    CompactMagnitude { raw: amount, unit }
}

// ============================================================================
// FORMAT / PARSE
// ============================================================================

/// Format an NT dollar amount
///
/// # Examples:
/// ```
/// use taiwan_locale::config::TwdFormatOptions;
/// use taiwan_locale::currency::format_twd;
///
/// assert_eq!(format_twd(1234.0, TwdFormatOptions::default()), "NT$ 1,234");
/// assert_eq!(format_twd(25_000_000.0, TwdFormatOptions::default().compact()), "NT$ 2.5千萬");
/// ```
pub fn format_twd(amount: f64, options: TwdFormatOptions) -> String {
    if options.compact && amount >= COMPACT_THRESHOLD {
        let magnitude = compact_magnitude(amount);
        if let Some(text) = magnitude.render() {
            tracing::trace!(amount, unit = ?magnitude.unit, "compact unit selected");
            return if options.show_symbol {
                format!("{}{}", SYMBOL_PREFIX, text)
            } else {
                text
            };
        }
    }

    let digits = if options.decimals { 2 } else { 0 };
    let number = grouped(amount, digits);

    if options.show_symbol {
        format!("{}{}", SYMBOL_PREFIX, number)
    } else if options.show_code {
        format!("{}{}", number, CODE_SUFFIX)
    } else {
        number
    }
}

/// Longest first so "NT$" is removed before "$"
const STRIP_TOKENS: [&str; 10] = [
    "新臺幣", "新台幣", "臺幣", "台幣", "NT$", "NTD", "TWD", "NT", "元", "$",
];

static UNIT_PATTERNS: Lazy<Vec<(CompactUnit, Regex)>> = Lazy::new(|| {
    COMPACT_UNITS
        .iter()
        .map(|unit| {
            let pattern = format!(r"(\d+(?:\.\d+)?){}", unit.glyph());
            (*unit, Regex::new(&pattern).expect("valid unit regex"))
        })
        .collect()
});

static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("valid number regex"));

/// Parse user-entered TWD text back into an amount
///
/// Returns None (never 0) when nothing numeric is found.
///
/// # Examples:
/// ```
/// use taiwan_locale::currency::parse_twd;
/// assert_eq!(parse_twd("NT$ 1,234"), Some(1234.0));
/// assert_eq!(parse_twd("1.2億"), Some(120_000_000.0));
/// assert_eq!(parse_twd("not a number"), None);
/// ```
pub fn parse_twd(text: &str) -> Option<f64> {
    let mut cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '，')
        .collect();
    for token in STRIP_TOKENS {
        cleaned = cleaned.replace(token, "");
    }

    for (unit, pattern) in UNIT_PATTERNS.iter() {
        if !cleaned.contains(unit.glyph()) {
            continue;
        }
        if let Some(caps) = pattern.captures(&cleaned) {
            let coefficient: f64 = caps[1].parse().ok()?;
            return Some(round_to(coefficient * unit.value(), 2));
        }
    }

    if !PLAIN_NUMBER.is_match(&cleaned) {
        tracing::debug!(input = %text, "rejected TWD text");
        return None;
    }

    cleaned.parse::<f64>().ok()
}

// ============================================================================
// DISCOUNT + INVOICE
// ============================================================================

/// "省 NT$ 200 (20% off)"
pub fn format_discount(original: f64, discounted: f64) -> Result<String> {
    if original == 0.0 {
        return Err(LocaleError::DivisionByZero {
            operation: "format_discount",
        });
    }

    let savings = original - discounted;
    let percent = (savings / original * 100.0).round() as i64;

    Ok(format!(
        "省 {} ({}% off)",
        format_twd(savings, TwdFormatOptions::default()),
        percent
    ))
}

/// Invoice lines: subtotal, business tax, total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceAmount {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub formatted_subtotal: String,
    pub formatted_tax: String,
    pub formatted_total: String,
}

pub const DEFAULT_TAX_RATE: f64 = 0.05;

/// Tax and total are whole dollars (rounded, not truncated)
///
/// # Examples:
/// ```
/// use taiwan_locale::currency::format_invoice_amount;
/// let invoice = format_invoice_amount(1363.64, 0.05);
/// assert_eq!(invoice.tax, 68.0);
/// assert_eq!(invoice.total, 1432.0);
/// ```
pub fn format_invoice_amount(subtotal: f64, tax_rate: f64) -> InvoiceAmount {
    let tax = (subtotal * tax_rate).round();
    let total = (subtotal + tax).round();
    let options = TwdFormatOptions::default().with_decimals();

    InvoiceAmount {
        subtotal,
        tax,
        total,
        formatted_subtotal: format_twd(subtotal, options),
        formatted_tax: format_twd(tax, options),
        formatted_total: format_twd(total, options),
    }
}

// ============================================================================
// FORMAL NUMERALS (大寫)
// ============================================================================

const FINANCIAL_DIGITS: [char; 10] = ['零', '壹', '貳', '參', '肆', '伍', '陸', '柒', '捌', '玖'];
const FINANCIAL_UNITS: [&str; 4] = ["", "拾", "佰", "仟"];
const SECTION_UNITS: [&str; 13] = [
    "", "萬", "億", "兆", "京", "垓", "秭", "穰", "溝", "澗", "正", "載", "極",
];

/// First amount past the 極 section (10^52)
pub const MAX_FORMAL_AMOUNT: f64 = 1e52;

// 2^53: at and above this every f64 is a whole number
const WHOLE_AMOUNT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Render an amount in financial numerals for checks and invoices
///
/// Zero digits are dropped; a section unit (萬/億/兆/京…) is emitted at its
/// position whenever any digit of that four-digit section is non-zero.
/// Amounts that are not finite or reach [`MAX_FORMAL_AMOUNT`] are rejected
/// rather than printed without their magnitude.
///
/// # Examples:
/// ```
/// use taiwan_locale::currency::to_chinese_numerals;
/// assert_eq!(to_chinese_numerals(0.0).unwrap(), "零元整");
/// assert_eq!(to_chinese_numerals(1234.0).unwrap(), "壹仟貳佰參拾肆元整");
/// assert_eq!(to_chinese_numerals(100_000_000.0).unwrap(), "壹億元整");
/// assert!(to_chinese_numerals(f64::INFINITY).is_err());
/// ```
pub fn to_chinese_numerals(amount: f64) -> Result<String> {
    if !amount.is_finite() || amount.abs() >= MAX_FORMAL_AMOUNT {
        tracing::debug!(amount, "amount has no formal numeral rendering");
        return Err(LocaleError::UnwritableAmount { amount });
    }

    let magnitude = amount.abs();
    let (integer, jiao, fen) = if magnitude < WHOLE_AMOUNT_LIMIT {
        let cents = (magnitude * 100.0).round() as u128;
        (
            (cents / 100).to_string(),
            (cents / 10 % 10) as usize,
            (cents % 10) as usize,
        )
    } else {
        (format!("{:.0}", magnitude), 0, 0)
    };

    if integer == "0" && jiao == 0 && fen == 0 {
        return Ok("零元整".to_string());
    }

    let mut out = String::new();
    if amount < 0.0 {
        out.push('負');
    }

    if integer == "0" {
        out.push(FINANCIAL_DIGITS[0]);
    } else {
        out.push_str(&integer_to_financial(&integer));
    }

    out.push('元');
    if jiao == 0 && fen == 0 {
        out.push('整');
        return Ok(out);
    }
    if jiao != 0 {
        out.push(FINANCIAL_DIGITS[jiao]);
        out.push('角');
    }
    if fen != 0 {
        out.push(FINANCIAL_DIGITS[fen]);
        out.push('分');
    }
    Ok(out)
}

/// `integer` is a run of ASCII digits, at most 52 long
fn integer_to_financial(integer: &str) -> String {
    let digits: Vec<usize> = integer.bytes().map(|b| (b - b'0') as usize).collect();
    let len = digits.len();
    let mut out = String::new();

    for (i, &digit) in digits.iter().enumerate() {
        let position = len - 1 - i;
        if digit != 0 {
            out.push(FINANCIAL_DIGITS[digit]);
            out.push_str(FINANCIAL_UNITS[position % 4]);
        }

        if position % 4 == 0 && position > 0 {
            let section_start = i.saturating_sub(3);
            let section_has_value = digits[section_start..=i].iter().any(|d| *d != 0);
            if section_has_value {
                out.push_str(SECTION_UNITS[position / 4]);
            }
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
