//! Locale-aware number, currency and column-name formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::{COST_COLUMN, CellValue};

/// Divisor turning a `cost_micros` value into currency units.
pub const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Supported display locales, each paired with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese, Brazilian real (`R$ 1.234,50`).
    #[default]
    #[serde(rename = "pt-BR", alias = "pt-br")]
    PtBr,
    /// US English, US dollar (`$1,234.50`).
    #[serde(rename = "en-US", alias = "en-us")]
    EnUs,
}

impl Locale {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::EnUs => "en-US",
        }
    }

    #[must_use]
    pub fn currency_code(self) -> &'static str {
        match self {
            Self::PtBr => "BRL",
            Self::EnUs => "USD",
        }
    }

    fn group_separator(self) -> char {
        match self {
            Self::PtBr => '.',
            Self::EnUs => ',',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Self::PtBr => ',',
            Self::EnUs => '.',
        }
    }

    fn currency_prefix(self) -> &'static str {
        match self {
            Self::PtBr => "R$\u{a0}",
            Self::EnUs => "$",
        }
    }

    /// Format with digit grouping and up to three fraction digits.
    #[must_use]
    pub fn format_number(self, value: f64) -> String {
        self.format_fixed(value, 3, true)
    }

    /// Format an integer count with digit grouping.
    #[must_use]
    pub fn format_count(self, value: u64) -> String {
        group_digits(u128::from(value), self.group_separator())
    }

    /// Format as currency with exactly two fraction digits.
    #[must_use]
    pub fn format_currency(self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let body = self.format_fixed(value.abs(), 2, false);
        let sign = if value < 0.0 && body.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{body}", self.currency_prefix())
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn format_fixed(self, value: f64, fraction_digits: u32, trim_zeros: bool) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let scale = 10_u128.pow(fraction_digits);
        let scaled = (value.abs() * scale as f64).round() as u128;
        let integer = scaled / scale;
        let fraction = scaled % scale;

        let mut out = String::new();
        if value < 0.0 && scaled != 0 {
            out.push('-');
        }
        out.push_str(&group_digits(integer, self.group_separator()));

        let mut digits = format!("{fraction:0width$}", width = fraction_digits as usize);
        if trim_zeros {
            while digits.ends_with('0') {
                digits.pop();
            }
        }
        if !digits.is_empty() {
            out.push(self.decimal_separator());
            out.push_str(&digits);
        }
        out
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing an unsupported locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale `{0}`, expected `pt-BR` or `en-US`")]
pub struct ParseLocaleError(String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" => Ok(Self::PtBr),
            "en-us" => Ok(Self::EnUs),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

fn group_digits(value: u128, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Turn a column name like `cost_micros` into a header label (`cost micros`).
#[must_use]
pub fn humanize_column(name: &str) -> String {
    name.replace(['_', '-'], " ")
}

/// Render a single cell for display.
///
/// Numbers in [`COST_COLUMN`] become currency after dividing by one million,
/// other numbers are grouped, text passes through unchanged and a missing
/// or null value renders as an empty cell.
#[must_use]
pub fn format_cell(value: Option<&CellValue>, column: &str, locale: Locale) -> String {
    match value {
        None | Some(CellValue::Null) => String::new(),
        Some(CellValue::Number(n)) if column == COST_COLUMN => {
            locale.format_currency(n / MICROS_PER_UNIT)
        }
        Some(CellValue::Number(n)) => locale.format_number(*n),
        Some(CellValue::Text(text)) => text.clone(),
        Some(CellValue::Bool(b)) => b.to_string(),
        Some(CellValue::Json(json)) => json.to_string(),
    }
}
