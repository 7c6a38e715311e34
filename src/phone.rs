// 📞 Phone - Taiwan telephone numbers
// Classify, validate, format and parse mobile / landline / toll-free numbers
//
// Two policies on purpose:
// - format_taiwan_phone is lenient: unknown input comes back unchanged
//   (users may be mid-typing)
// - is_valid_taiwan_phone / parse_taiwan_phone are strict

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const INTERNATIONAL_PREFIX: &str = "+886-";
const COUNTRY_CODE: &str = "886";

// ============================================================================
// CORE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhoneType {
    Mobile,
    Landline,
    TollFree,
}

impl PhoneType {
    /// Display label shown next to a number
    pub fn label(&self) -> &'static str {
        match self {
            PhoneType::Mobile => "手機",
            PhoneType::Landline => "市話",
            PhoneType::TollFree => "免付費電話",
        }
    }

    /// Key used by callers that carry the type as text
    pub fn key(&self) -> &'static str {
        match self {
            PhoneType::Mobile => "mobile",
            PhoneType::Landline => "landline",
            PhoneType::TollFree => "tollFree",
        }
    }
}

/// Classification of a valid number; exactly one per number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneClass {
    Mobile,
    Landline { area_code: String },
    TollFree,
}

impl PhoneClass {
    pub fn phone_type(&self) -> PhoneType {
        match self {
            PhoneClass::Mobile => PhoneType::Mobile,
            PhoneClass::Landline { .. } => PhoneType::Landline,
            PhoneClass::TollFree => PhoneType::TollFree,
        }
    }
}

/// Output of parse_taiwan_phone()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPhone {
    #[serde(rename = "type")]
    pub phone_type: PhoneType,
    pub area_code: Option<String>,

    /// Canonical digits, trunk "0" restored
    pub number: String,

    /// Domestic layout ("02-1234-5678")
    pub formatted: String,

    /// "+886-2-1234-5678"
    pub international: String,
}

// ============================================================================
// SCHEME TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemeKind {
    Mobile,
    TollFree,
    Landline,
}

/// One row of the dispatch table: pattern → classification + digit grouping
struct PhoneScheme {
    name: &'static str,
    pattern: Regex,
    kind: SchemeKind,
    groups: &'static [usize],
}

impl PhoneScheme {
    fn new(name: &'static str, pattern: &str, kind: SchemeKind, groups: &'static [usize]) -> Self {
        PhoneScheme {
            name,
            pattern: Regex::new(pattern).expect("valid phone regex"),
            kind,
            groups,
        }
    }

    fn classify(&self, digits: &str) -> PhoneClass {
        match self.kind {
            SchemeKind::Mobile => PhoneClass::Mobile,
            SchemeKind::TollFree => PhoneClass::TollFree,
            SchemeKind::Landline => PhoneClass::Landline {
                area_code: digits[..self.groups[0]].to_string(),
            },
        }
    }

    fn layout(&self, digits: &str) -> Vec<String> {
        let mut parts = Vec::with_capacity(self.groups.len());
        let mut start = 0;
        for len in self.groups {
            parts.push(digits[start..start + len].to_string());
            start += len;
        }
        parts
    }
}

/// Evaluated top to bottom; the specific city and service patterns sit
/// above the generic "other area" rows, which would also match them.
static PHONE_SCHEMES: Lazy<Vec<PhoneScheme>> = Lazy::new(|| {
    vec![
        PhoneScheme::new("mobile", r"^09\d{8}$", SchemeKind::Mobile, &[4, 3, 3]),
        PhoneScheme::new("toll-free", r"^0800\d{6}$", SchemeKind::TollFree, &[4, 3, 3]),
        PhoneScheme::new("taipei", r"^02\d{8}$", SchemeKind::Landline, &[2, 4, 4]),
        PhoneScheme::new("taichung", r"^04\d{8}$", SchemeKind::Landline, &[2, 4, 4]),
        PhoneScheme::new("kaohsiung", r"^07\d{7}$", SchemeKind::Landline, &[2, 3, 4]),
        PhoneScheme::new("other-8", r"^0[3-9]\d{8}$", SchemeKind::Landline, &[2, 4, 4]),
        PhoneScheme::new("other-7", r"^0[3-9]\d{7}$", SchemeKind::Landline, &[2, 3, 4]),
    ]
});

fn scheme_for(digits: &str) -> Option<&'static PhoneScheme> {
    let scheme = PHONE_SCHEMES.iter().find(|s| s.pattern.is_match(digits))?;
    tracing::trace!(digits, scheme = scheme.name, "phone scheme matched");
    Some(scheme)
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Replace a leading "886" country code with the trunk "0"
fn restore_trunk(digits: &str) -> String {
    match digits.strip_prefix(COUNTRY_CODE) {
        Some(rest) if rest.starts_with('0') => rest.to_string(),
        Some(rest) => format!("0{}", rest),
        None => digits.to_string(),
    }
}

/// Strip everything but digits, then collapse "886" to a leading "0"
///
/// # Examples:
/// ```
/// use taiwan_locale::phone::normalize_phone;
/// assert_eq!(normalize_phone("+886 912 345 678"), "0912345678");
/// assert_eq!(normalize_phone("(02) 1234-5678"), "0212345678");
/// ```
pub fn normalize_phone(text: &str) -> String {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    restore_trunk(&digits)
}

/// Structural equality of normalized forms
pub fn compare_phones(a: &str, b: &str) -> bool {
    normalize_phone(a) == normalize_phone(b)
}

/// Validation only tolerates separators; anything else must already be digits
fn clean_for_validation(text: &str) -> Option<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '(' | ')' | '-'))
        .collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if cleaned.starts_with('+') && !digits.starts_with(COUNTRY_CODE) {
        return None;
    }
    Some(restore_trunk(digits))
}

// ============================================================================
// VALIDATE / CLASSIFY / FORMAT / PARSE
// ============================================================================

/// True iff the number matches exactly one known scheme
pub fn is_valid_taiwan_phone(text: &str) -> bool {
    clean_for_validation(text)
        .map(|digits| scheme_for(&digits).is_some())
        .unwrap_or(false)
}

/// Classification of a valid number, None otherwise
pub fn classify_phone(text: &str) -> Option<PhoneClass> {
    let digits = clean_for_validation(text)?;
    let scheme = scheme_for(&digits)?;
    Some(scheme.classify(&digits))
}

/// Best-effort display formatting; unmatched input is returned unchanged
///
/// # Examples:
/// ```
/// use taiwan_locale::phone::format_taiwan_phone;
/// assert_eq!(format_taiwan_phone("0912345678", false), "0912-345-678");
/// assert_eq!(format_taiwan_phone("0212345678", true), "+886-2-1234-5678");
/// assert_eq!(format_taiwan_phone("0912", false), "0912");
/// ```
pub fn format_taiwan_phone(text: &str, international: bool) -> String {
    let digits = normalize_phone(text);
    match scheme_for(&digits) {
        Some(scheme) => render(scheme, &digits, international),
        None => text.to_string(),
    }
}

fn render(scheme: &PhoneScheme, digits: &str, international: bool) -> String {
    let mut parts = scheme.layout(digits);
    if international {
        parts[0].remove(0);
        format!("{}{}", INTERNATIONAL_PREFIX, parts.join("-"))
    } else {
        parts.join("-")
    }
}

/// Strict parse into a classified, formatted number
pub fn parse_taiwan_phone(text: &str) -> Option<ParsedPhone> {
    let Some(digits) = clean_for_validation(text) else {
        tracing::debug!(input = %text, "rejected phone text");
        return None;
    };
    let Some(scheme) = scheme_for(&digits) else {
        tracing::debug!(input = %text, "no phone scheme matched");
        return None;
    };

    let class = scheme.classify(&digits);
    let area_code = match &class {
        PhoneClass::Landline { area_code } => Some(area_code.clone()),
        _ => None,
    };

    Some(ParsedPhone {
        phone_type: class.phone_type(),
        area_code,
        formatted: render(scheme, &digits, false),
        international: render(scheme, &digits, true),
        number: digits,
    })
}

// ============================================================================
// LOOKUP TABLES
// ============================================================================

/// Label for a type key ("mobile", "landline", "tollFree"); "未知" otherwise
pub fn phone_type_label(key: &str) -> &'static str {
    [PhoneType::Mobile, PhoneType::Landline, PhoneType::TollFree]
        .iter()
        .find(|t| t.key() == key)
        .map(|t| t.label())
        .unwrap_or("未知")
}

/// Longest prefix first
const TOLL_FREE_PREFIX: &str = "0800";

const AREA_NAMES: [(&str, &str); 12] = [
    ("0836", "馬祖"),
    ("082", "金門"),
    ("089", "台東"),
    ("037", "苗栗"),
    ("049", "南投"),
    ("02", "台北"),
    ("03", "桃園、新竹、宜蘭、花蓮"),
    ("04", "台中"),
    ("05", "嘉義、雲林"),
    ("06", "台南、澎湖"),
    ("07", "高雄"),
    ("08", "屏東"),
];

/// Area name for an area code or a full landline number; "未知地區" otherwise
///
/// Toll-free 0800 numbers have no area even though they share the 08 prefix.
pub fn get_area_name(code_or_number: &str) -> &'static str {
    let digits = normalize_phone(code_or_number);
    if digits.starts_with(TOLL_FREE_PREFIX) {
        return "未知地區";
    }
    AREA_NAMES
        .iter()
        .find(|(prefix, _)| digits.starts_with(prefix))
        .map(|(_, name)| *name)
        .unwrap_or("未知地區")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("0912-345-678"), "0912345678");
        assert_eq!(normalize_phone("+886 912 345 678"), "0912345678");
        assert_eq!(normalize_phone("886912345678"), "0912345678");
        assert_eq!(normalize_phone("+886 0912 345 678"), "0912345678");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["+886912345678", "02-1234-5678", "886886123", "abc", "0800-000-123"] {
            let once = normalize_phone(raw);
            assert_eq!(normalize_phone(&once), once, "not idempotent for {}", raw);
        }
    }

    #[test]
    fn test_compare_phones() {
        assert!(compare_phones("0912345678", "+886912345678"));
        assert!(compare_phones("0912-345-678", "+886 912 345 678"));
        assert!(!compare_phones("0912345678", "0912345679"));
    }

    #[test]
    fn test_is_valid_each_scheme() {
        assert!(is_valid_taiwan_phone("0912-345-678"));
        assert!(is_valid_taiwan_phone("(02) 1234-5678"));
        assert!(is_valid_taiwan_phone("04-2345-6789"));
        assert!(is_valid_taiwan_phone("07-123-4567"));
        assert!(is_valid_taiwan_phone("03-123-4567"));
        assert!(is_valid_taiwan_phone("06-2345-6789"));
        assert!(is_valid_taiwan_phone("0800-123-456"));
        assert!(is_valid_taiwan_phone("+886 912 345 678"));
    }

    #[test]
    fn test_is_valid_rejects() {
        assert!(!is_valid_taiwan_phone(""));
        assert!(!is_valid_taiwan_phone("0912"));
        assert!(!is_valid_taiwan_phone("0112345678"));
        assert!(!is_valid_taiwan_phone("09123456789"));
        assert!(!is_valid_taiwan_phone("0912.345.678"));
        assert!(!is_valid_taiwan_phone("+1 912 345 678"));
    }

    #[test]
    fn test_classify_most_specific_first() {
        assert_eq!(classify_phone("0912345678"), Some(PhoneClass::Mobile));
        assert_eq!(classify_phone("0800123456"), Some(PhoneClass::TollFree));
        assert_eq!(
            classify_phone("0212345678"),
            Some(PhoneClass::Landline { area_code: "02".to_string() })
        );
        assert_eq!(
            classify_phone("071234567"),
            Some(PhoneClass::Landline { area_code: "07".to_string() })
        );
        assert_eq!(classify_phone("123"), None);
    }

    #[test]
    fn test_format_domestic() {
        assert_eq!(format_taiwan_phone("0912345678", false), "0912-345-678");
        assert_eq!(format_taiwan_phone("0212345678", false), "02-1234-5678");
        assert_eq!(format_taiwan_phone("0423456789", false), "04-2345-6789");
        assert_eq!(format_taiwan_phone("071234567", false), "07-123-4567");
        assert_eq!(format_taiwan_phone("031234567", false), "03-123-4567");
        assert_eq!(format_taiwan_phone("0312345678", false), "03-1234-5678");
        assert_eq!(format_taiwan_phone("0800123456", false), "0800-123-456");
    }

    #[test]
    fn test_format_international() {
        assert_eq!(format_taiwan_phone("0912345678", true), "+886-912-345-678");
        assert_eq!(format_taiwan_phone("+886212345678", true), "+886-2-1234-5678");
        assert_eq!(format_taiwan_phone("0800123456", true), "+886-800-123-456");
        assert_eq!(format_taiwan_phone("+886 912 345 678", false), "0912-345-678");
    }

    #[test]
    fn test_format_unmatched_returned_unchanged() {
        assert_eq!(format_taiwan_phone("09-12", false), "09-12");
        assert_eq!(format_taiwan_phone("hello", true), "hello");
        assert_eq!(format_taiwan_phone("", false), "");
    }

    #[test]
    fn test_format_is_lenient_where_validation_is_strict() {
        assert!(!is_valid_taiwan_phone("0912.345.678"));
        assert_eq!(format_taiwan_phone("0912.345.678", false), "0912-345-678");
    }

    #[test]
    fn test_parse_mobile() {
        let parsed = parse_taiwan_phone("0912-345-678").unwrap();
        assert_eq!(parsed.phone_type, PhoneType::Mobile);
        assert_eq!(parsed.area_code, None);
        assert_eq!(parsed.number, "0912345678");
        assert_eq!(parsed.formatted, "0912-345-678");
        assert_eq!(parsed.international, "+886-912-345-678");
    }

    #[test]
    fn test_parse_landline_area_code() {
        let parsed = parse_taiwan_phone("+886 2 1234 5678").unwrap();
        assert_eq!(parsed.phone_type, PhoneType::Landline);
        assert_eq!(parsed.area_code, Some("02".to_string()));
        assert_eq!(parsed.formatted, "02-1234-5678");
    }

    #[test]
    fn test_parse_toll_free() {
        let parsed = parse_taiwan_phone("0800-123-456").unwrap();
        assert_eq!(parsed.phone_type, PhoneType::TollFree);
        assert_eq!(parsed.area_code, None);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_taiwan_phone("garbage"), None);
        assert_eq!(parse_taiwan_phone("0912"), None);
    }

    #[test]
    fn test_parsed_phone_serializes_type_key() {
        let parsed = parse_taiwan_phone("0800123456").unwrap();
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["type"], "tollFree");
        assert_eq!(json["areaCode"], serde_json::Value::Null);
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(phone_type_label("mobile"), "手機");
        assert_eq!(phone_type_label("landline"), "市話");
        assert_eq!(phone_type_label("tollFree"), "免付費電話");
        assert_eq!(phone_type_label("fax"), "未知");
        assert_eq!(PhoneType::Mobile.label(), "手機");
    }

    #[test]
    fn test_area_names() {
        assert_eq!(get_area_name("02"), "台北");
        assert_eq!(get_area_name("037"), "苗栗");
        assert_eq!(get_area_name("03-123-4567"), "桃園、新竹、宜蘭、花蓮");
        assert_eq!(get_area_name("0836"), "馬祖");
        assert_eq!(get_area_name("07"), "高雄");
        assert_eq!(get_area_name("0912345678"), "未知地區");
        assert_eq!(get_area_name(""), "未知地區");
    }

    #[test]
    fn test_area_name_skips_toll_free() {
        assert_eq!(get_area_name("0800123456"), "未知地區");
        assert_eq!(get_area_name("0800-123-456"), "未知地區");
        assert_eq!(get_area_name("0800"), "未知地區");
        assert_eq!(get_area_name("08-7654321"), "屏東");
        assert_eq!(get_area_name("082312345"), "金門");
    }
}
