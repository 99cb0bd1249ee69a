//! Amount parsing and Polish-style formatting.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::XML_DECIMAL;

/// Parse an XML decimal (`1234.56`, `-10`).
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if !XML_DECIMAL.is_match(s) {
        return None;
    }
    Decimal::from_str(s).ok()
}

/// Format amount in Polish style (1 234,56).
pub fn format_polish_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{},{}", sign, formatted, decimal_part)
}

/// Printable amount: Polish format when the value is a decimal, raw text
/// otherwise.
pub fn display_amount(raw: &str) -> String {
    parse_amount(raw)
        .map(format_polish_amount)
        .unwrap_or_else(|| raw.to_string())
}

/// Printable amount followed by a currency code.
pub fn display_amount_with_currency(raw: &str, currency: Option<&str>) -> String {
    match currency {
        Some(currency) => format!("{} {}", display_amount(raw), currency),
        None => display_amount(raw),
    }
}
