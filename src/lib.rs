// Taiwan Locale Engine - Core Library
// Pure formatting/parsing for NT dollars, phone numbers, numerals and dates.
// Every function is stateless and safe to call from any thread.

pub mod config;
pub mod currency;
pub mod date;
pub mod digits;
pub mod error;
pub mod number;
pub mod phone;

// Re-export commonly used types
pub use config::{ChineseNumberOptions, LocaleConfig, TwdFormatOptions};
pub use currency::{
    compact_magnitude, format_discount, format_invoice_amount, format_twd, parse_twd,
    to_chinese_numerals, CompactMagnitude, CompactUnit, InvoiceAmount,
};
pub use date::{
    format_date_range, format_event_duration, format_relative_time, format_roc_date,
    format_taiwan_date, format_taiwan_day, parse_taiwan_date, DateFormatLevel, RocDate,
};
pub use error::{LocaleError, Result};
pub use number::{
    format_chinese_number, format_distance, format_file_size, format_ordinal,
    format_percentage, format_ratio, format_score, from_chinese_numeral, parse_chinese_number,
    to_chinese_numeral,
};
pub use phone::{
    classify_phone, compare_phones, format_taiwan_phone, get_area_name, is_valid_taiwan_phone,
    normalize_phone, parse_taiwan_phone, phone_type_label, ParsedPhone, PhoneClass, PhoneType,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
