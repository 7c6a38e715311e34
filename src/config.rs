// ⚙️ Format options + engine configuration
// Options are plain values passed per call; LocaleConfig bundles the defaults
// a caller (or the twfmt binary) wants to reuse, loadable from JSON.

use crate::date::DateFormatLevel;
use crate::digits::MAX_FRACTION_DIGITS;
use crate::error::LocaleError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// CURRENCY OPTIONS
// ============================================================================

/// Options for `format_twd`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TwdFormatOptions {
    /// Prefix "NT$ " (wins over `show_code` when both are set)
    pub show_symbol: bool,

    /// Suffix " TWD"
    pub show_code: bool,

    /// Force exactly 2 fractional digits (otherwise 0)
    pub decimals: bool,

    /// 萬/十萬/百萬/千萬/億 notation for amounts ≥ 10,000
    pub compact: bool,
}

impl Default for TwdFormatOptions {
    fn default() -> Self {
        TwdFormatOptions {
            show_symbol: true,
            show_code: false,
            decimals: false,
            compact: false,
        }
    }
}

impl TwdFormatOptions {
    /// Builder pattern: enable compact notation
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    /// Builder pattern: force 2 fractional digits
    pub fn with_decimals(mut self) -> Self {
        self.decimals = true;
        self
    }

    /// Builder pattern: " TWD" suffix instead of the symbol
    pub fn code_only(mut self) -> Self {
        self.show_symbol = false;
        self.show_code = true;
        self
    }

    /// Builder pattern: bare number
    pub fn bare(mut self) -> Self {
        self.show_symbol = false;
        self.show_code = false;
        self
    }
}

// ============================================================================
// NUMBER OPTIONS
// ============================================================================

/// Options for `format_chinese_number`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChineseNumberOptions {
    /// Fractional digits; with large units, 0 means "1"
    pub decimals: u32,

    /// Render with 億/萬/千
    pub use_chinese_units: bool,

    /// Same effect as `use_chinese_units`
    pub compact: bool,
}

impl ChineseNumberOptions {
    pub fn wants_units(&self) -> bool {
        self.use_chinese_units || self.compact
    }
}

// ============================================================================
// ENGINE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocaleConfig {
    pub currency: TwdFormatOptions,
    pub number: ChineseNumberOptions,
    pub date_level: DateFormatLevel,

    /// Business tax rate used for invoices (營業稅 5%)
    pub invoice_tax_rate: f64,

    /// Level for the twfmt subscriber ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        LocaleConfig {
            currency: TwdFormatOptions::default(),
            number: ChineseNumberOptions::default(),
            date_level: DateFormatLevel::default(),
            invoice_tax_rate: 0.05,
            log_level: "warn".to_string(),
        }
    }
}

impl LocaleConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json_str(&content)
    }

    /// Parse + validate config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LocaleConfig =
            serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), LocaleError> {
        if !self.invoice_tax_rate.is_finite() || !(0.0..=1.0).contains(&self.invoice_tax_rate) {
            return Err(LocaleError::InvalidConfig(format!(
                "invoiceTaxRate must be within 0..=1, got {}",
                self.invoice_tax_rate
            )));
        }

        if self.number.decimals > MAX_FRACTION_DIGITS {
            return Err(LocaleError::InvalidConfig(format!(
                "number.decimals must be at most {}, got {}",
                MAX_FRACTION_DIGITS, self.number.decimals
            )));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(LocaleError::InvalidConfig(format!(
                "unknown logLevel: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twd_defaults_show_symbol_only() {
        let opts = TwdFormatOptions::default();
        assert!(opts.show_symbol);
        assert!(!opts.show_code);
        assert!(!opts.decimals);
        assert!(!opts.compact);
    }

    #[test]
    fn test_builder_chain() {
        let opts = TwdFormatOptions::default().code_only().with_decimals();
        assert!(!opts.show_symbol);
        assert!(opts.show_code);
        assert!(opts.decimals);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = LocaleConfig::from_json_str(
            r#"{ "currency": { "compact": true }, "dateLevel": "long" }"#,
        )
        .unwrap();

        assert!(config.currency.compact);
        assert!(config.currency.show_symbol);
        assert_eq!(config.date_level, DateFormatLevel::Long);
        assert_eq!(config.invoice_tax_rate, 0.05);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_rejects_bad_tax_rate() {
        let result = LocaleConfig::from_json_str(r#"{ "invoiceTaxRate": 1.5 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_oversized_decimals() {
        let result = LocaleConfig::from_json_str(
            r#"{ "number": { "decimals": 40, "useChineseUnits": true } }"#,
        );
        assert!(result.is_err());

        let config = LocaleConfig::from_json_str(r#"{ "number": { "decimals": 20 } }"#).unwrap();
        assert_eq!(config.number.decimals, MAX_FRACTION_DIGITS);
    }

    #[test]
    fn test_config_rejects_unknown_log_level() {
        let config = LocaleConfig {
            log_level: "loud".to_string(),
            ..LocaleConfig::default()
        };
        assert!(matches!(config.validate(), Err(LocaleError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_missing_file() {
        let result = LocaleConfig::from_file("/nonexistent/twfmt.json");
        assert!(result.is_err());
    }
}
