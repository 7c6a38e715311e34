// 📅 Date - Taiwan-convention dates
// Fixed-pattern formatting, relative phrasing, range collapsing,
// event durations and the 民國 (ROC) calendar.
//
// ROC year = Gregorian year - 1911, always. No clamping around 1911:
// negative ROC years are the caller's business.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROC_OFFSET: i32 = 1911;

// ============================================================================
// FORMAT LEVELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateFormatLevel {
    /// 2025/03/01
    Short,
    /// 2025年03月01日
    #[default]
    Medium,
    /// 2025年03月01日 星期六
    Long,
    /// 2025/03/01 14:30
    Datetime,
    /// 03月01日
    MonthDay,
    /// 2025年03月
    YearMonth,
    /// 星期六
    Weekday,
}

const WEEKDAY_NAMES: [&str; 7] = ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Format with one of the fixed patterns
///
/// # Examples:
/// ```
/// use chrono::NaiveDate;
/// use taiwan_locale::date::{format_taiwan_date, DateFormatLevel};
///
/// let dt = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(14, 30, 0).unwrap();
/// assert_eq!(format_taiwan_date(dt, DateFormatLevel::Medium), "2025年03月01日");
/// assert_eq!(format_taiwan_date(dt, DateFormatLevel::Long), "2025年03月01日 星期六");
/// ```
pub fn format_taiwan_date(date: NaiveDateTime, level: DateFormatLevel) -> String {
    match level {
        DateFormatLevel::Short => date.format("%Y/%m/%d").to_string(),
        DateFormatLevel::Medium => date.format("%Y年%m月%d日").to_string(),
        DateFormatLevel::Long => format!(
            "{} {}",
            date.format("%Y年%m月%d日"),
            weekday_name(date.weekday())
        ),
        DateFormatLevel::Datetime => date.format("%Y/%m/%d %H:%M").to_string(),
        DateFormatLevel::MonthDay => date.format("%m月%d日").to_string(),
        DateFormatLevel::YearMonth => date.format("%Y年%m月").to_string(),
        DateFormatLevel::Weekday => weekday_name(date.weekday()).to_string(),
    }
}

/// Date-only convenience (midnight)
pub fn format_taiwan_day(date: NaiveDate, level: DateFormatLevel) -> String {
    format_taiwan_date(date.and_time(NaiveTime::default()), level)
}

/// "上午 9:05" / "下午 2:30"
pub fn format_time_of_day(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let period = if is_pm { "下午" } else { "上午" };
    format!("{} {}:{:02}", period, hour, time.minute())
}

// ============================================================================
// RELATIVE TIME
// ============================================================================

/// 今天 / 昨天 / 明天 by calendar day, then a generic distance phrase
///
/// The calendar-day cases win even when the distance phrase would also fit
/// ("3小時前" on the same day is still 今天).
pub fn format_relative_time(date: NaiveDateTime, base: NaiveDateTime) -> String {
    match (date.date() - base.date()).num_days() {
        0 => "今天".to_string(),
        -1 => "昨天".to_string(),
        1 => "明天".to_string(),
        _ => format_distance_phrase((date - base).num_seconds()),
    }
}

/// Relative to the local clock
pub fn format_relative_time_now(date: NaiveDateTime) -> String {
    format_relative_time(date, chrono::Local::now().naive_local())
}

/// Signed seconds (negative = past) → "N天前", "N小時後", ...
pub fn format_distance_phrase(seconds: i64) -> String {
    let suffix = if seconds < 0 { "前" } else { "後" };
    let abs = seconds.unsigned_abs();

    let minutes = abs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        return format!("不到1分鐘{}", suffix);
    }

    let amount = if hours < 1 {
        format!("{}分鐘", minutes)
    } else if days < 1 {
        format!("{}小時", hours)
    } else if days < 30 {
        format!("{}天", days)
    } else if days < 365 {
        format!("{}個月", days / 30)
    } else {
        format!("{}年", days / 365)
    };

    format!("{}{}", amount, suffix)
}

// ============================================================================
// RANGES + DURATIONS
// ============================================================================

/// Shortest unambiguous phrase for a date range, most specific case first
///
/// # Examples:
/// ```
/// use chrono::NaiveDate;
/// use taiwan_locale::date::format_date_range;
///
/// let d = |month, day| NaiveDate::from_ymd_opt(2025, month, day).unwrap();
/// assert_eq!(format_date_range(d(3, 1), d(3, 1)), "2025年03月01日");
/// assert_eq!(format_date_range(d(3, 1), d(3, 15)), "2025年3月1日 - 15日");
/// assert_eq!(format_date_range(d(3, 1), d(6, 15)), "2025年3月1日 - 6月15日");
/// ```
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        return format_taiwan_day(start, DateFormatLevel::Medium);
    }

    if start.year() == end.year() && start.month() == end.month() {
        return format!(
            "{}年{}月{}日 - {}日",
            start.year(),
            start.month(),
            start.day(),
            end.day()
        );
    }

    if start.year() == end.year() {
        return format!(
            "{}年{}月{}日 - {}月{}日",
            start.year(),
            start.month(),
            start.day(),
            end.month(),
            end.day()
        );
    }

    format!(
        "{} - {}",
        format_taiwan_day(start, DateFormatLevel::Medium),
        format_taiwan_day(end, DateFormatLevel::Medium)
    )
}

/// Days / hours / minutes; minutes only when under a full day
pub fn format_event_duration(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let total_minutes = (end - start).num_minutes();
    if total_minutes < 1 {
        return "少於1分鐘".to_string();
    }

    let days = total_minutes / (24 * 60);
    let hours = total_minutes % (24 * 60) / 60;
    let minutes = total_minutes % 60;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{}天", days));
    }
    if hours > 0 {
        out.push_str(&format!("{}小時", hours));
    }
    if days == 0 && minutes > 0 {
        out.push_str(&format!("{}分鐘", minutes));
    }
    out
}

// ============================================================================
// ROC CALENDAR
// ============================================================================

pub fn to_roc_year(gregorian_year: i32) -> i32 {
    gregorian_year - ROC_OFFSET
}

pub fn from_roc_year(roc_year: i32) -> i32 {
    roc_year + ROC_OFFSET
}

/// A date in 民國 years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RocDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl RocDate {
    /// None when month/day do not form a real date
    pub fn to_gregorian(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(from_roc_year(self.year), self.month, self.day)
    }
}

impl From<NaiveDate> for RocDate {
    fn from(date: NaiveDate) -> Self {
        RocDate {
            year: to_roc_year(date.year()),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for RocDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "民國{}年{}月{}日", self.year, self.month, self.day)
    }
}

/// "民國114年1月14日"
pub fn format_roc_date(date: NaiveDate) -> String {
    RocDate::from(date).to_string()
}

// ============================================================================
// PARSING
// ============================================================================

/// Tried in order; the offset is added to the captured year
static DATE_PATTERNS: Lazy<Vec<(Regex, i32)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").expect("valid date regex"), 0),
        (Regex::new(r"^(\d{4})年(\d{1,2})月(\d{1,2})日$").expect("valid date regex"), 0),
        (Regex::new(r"^民國(\d{1,3})年(\d{1,2})月(\d{1,2})日$").expect("valid date regex"), ROC_OFFSET),
    ]
});

/// Parse "2025/03/01", "2025年3月1日" or "民國114年3月1日"
///
/// # Examples:
/// ```
/// use chrono::NaiveDate;
/// use taiwan_locale::date::parse_taiwan_date;
///
/// assert_eq!(parse_taiwan_date("民國114年1月14日"), NaiveDate::from_ymd_opt(2025, 1, 14));
/// assert_eq!(parse_taiwan_date("garbage"), None);
/// ```
pub fn parse_taiwan_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    for (pattern, offset) in DATE_PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };

        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;

        let date = NaiveDate::from_ymd_opt(year + offset, month, day);
        if date.is_none() {
            tracing::debug!(input = %text, "date shape matched but is not a calendar date");
        }
        return date;
    }

    tracing::debug!(input = %text, "no date pattern matched");
    None
}

// ============================================================================
// TESTS
// ============================================================================
