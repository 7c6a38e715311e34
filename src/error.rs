// ⚠️ Typed failures for the strict side of the engine
//
// Display helpers never fail. Parsers signal "no value" with Option.
// What is left (range checks, caller errors, bad config) lands here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocaleError {
    /// Input outside the domain a conversion supports
    #[error("value {value} is out of range {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    /// A ratio whose denominator is zero
    #[error("division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// An amount with no formal-numeral rendering (not finite, or past 極)
    #[error("amount {amount} cannot be written in formal numerals")]
    UnwritableAmount { amount: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LocaleError>;
