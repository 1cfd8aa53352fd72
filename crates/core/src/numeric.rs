//! Decimal parsing and money formatting.
//!
//! Input fields are frequently empty or half-typed while the user edits them,
//! so parsing is total: anything that does not start with a number reads as 0.
//! Formatting always produces exactly two fraction digits with digit grouping,
//! and every string produced by [`NumberStyle::format`] parses back to the
//! value it was rendered from (within rounding to the cent).

use serde::{Deserialize, Serialize};

/// Default currency marker appended to money amounts.
pub const DEFAULT_CURRENCY: &str = "₸";

/// No-break space, used by the ru-RU locale between digit groups.
const NBSP: char = '\u{00A0}';

/// How numbers are rendered for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberStyle {
    /// Separator between the integer and fraction digits.
    pub decimal_separator: char,
    /// Separator between thousands groups. Always a whitespace character so
    /// that [`parse`] can strip it unconditionally.
    pub group_separator: char,
    /// Integer digits required before grouping kicks in
    /// (ru-RU leaves 4-digit numbers ungrouped).
    pub min_grouping_digits: usize,
    /// Marker appended to money amounts, e.g. `"₸"`.
    pub currency: String,
}

impl Default for NumberStyle {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ' ',
            min_grouping_digits: 4,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl NumberStyle {
    /// The style a browser renders for `toLocaleString('ru-RU')`:
    /// `12 345,67` with a no-break space and decimal comma.
    pub fn ru() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: NBSP,
            min_grouping_digits: 5,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Replace the currency marker.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Parse a user-entered or previously formatted number. Never fails.
    pub fn parse(&self, raw: &str) -> f64 {
        let stripped = if self.currency.is_empty() || self.currency == DEFAULT_CURRENCY {
            raw.to_string()
        } else {
            raw.replace(self.currency.as_str(), "")
        };
        parse(&stripped)
    }

    /// Render with exactly two fraction digits and digit grouping.
    /// Non-finite values render as `0.00` (in this style's separators).
    pub fn format(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let fixed = format!("{:.2}", value.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');

        let mut out = String::with_capacity(fixed.len() + 4);
        if negative {
            out.push('-');
        }
        out.push_str(&self.group_digits(int_part));
        out.push(self.decimal_separator);
        out.push_str(frac_part);
        out
    }

    /// [`format`](Self::format) followed by a space and the currency marker.
    pub fn format_money(&self, value: f64) -> String {
        if self.currency.is_empty() {
            return self.format(value);
        }
        format!("{} {}", self.format(value), self.currency)
    }

    fn group_digits(&self, digits: &str) -> String {
        if digits.len() < self.min_grouping_digits.max(1) || digits.len() <= 3 {
            return digits.to_string();
        }
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }
        out
    }
}

/// Parse a decimal the way the worksheet reads its input fields.
///
/// Whitespace (including no-break spaces) and the default currency marker are
/// removed, every comma becomes a decimal point, and the longest numeric
/// prefix is read. Empty, unparseable or non-finite input yields `0.0`.
pub fn parse(raw: &str) -> f64 {
    if raw.is_empty() {
        return 0.0;
    }
    let normalized: String = raw
        .replace(DEFAULT_CURRENCY, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    match numeric_prefix(&normalized) {
        Some(text) => text.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        None => 0.0,
    }
}

/// Format with the default style (`1 234.56`).
pub fn format(value: f64) -> String {
    NumberStyle::default().format(value)
}

/// Format with the default style and currency marker (`1 234.56 ₸`).
pub fn format_money(value: f64) -> String {
    NumberStyle::default().format_money(value)
}

/// Shortest text that reads back as `value`, as an input field would hold it
/// (`2`, `0.5`, `1250.75`). Used where an entered quantity or price is
/// emitted verbatim rather than as a display amount.
pub fn plain(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Extract the leading float literal: `[+-]digits[.digits][e[+-]digits]`.
/// Returns a canonical form that `str::parse::<f64>` accepts, or `None` when
/// there is no mantissa digit at the start.
fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut out = String::new();

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        if bytes[i] == b'-' {
            out.push('-');
        }
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &s[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    out.push('.');
    out.push_str(if frac_digits.is_empty() { "0" } else { frac_digits });

    // Exponent only counts when at least one digit follows it
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        let mut exp = String::from("e");
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            if bytes[j] == b'-' {
                exp.push('-');
            }
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            exp.push_str(&s[exp_start..j]);
            out.push_str(&exp);
        }
    }

    Some(out)
}
