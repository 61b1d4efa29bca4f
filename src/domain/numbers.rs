// src/domain/numbers.rs

//! Best-effort numeric coercion of the catalog's formatted text.
//!
//! Both parsers return 0.0 for blank, sentinel or unparseable input. A zero
//! therefore means "free, missing or garbage" and is only fit for ordering.

use crate::domain::listing::SENTINEL;

/// `"₱ 6,265,000"` -> `6265000.0`
pub fn parse_currency(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == SENTINEL {
        return 0.0;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && !is_currency_symbol(*c))
        .collect();

    finite_or_zero(&cleaned)
}

/// `"80 sqm"` -> `80.0`
pub fn parse_area_magnitude(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    finite_or_zero(&cleaned)
}

fn finite_or_zero(cleaned: &str) -> f64 {
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

fn is_currency_symbol(c: char) -> bool {
    matches!(
        c,
        '₱' | '$' | '€' | '£' | '¥' | '₩' | '₹' | '₫' | '฿' | '¢'
    )
}
