//! Price arithmetic and display.
//!
//! Catalog prices arrive as JSON numbers (e.g. `9.99`). They are held as
//! [`Decimal`] so cart and order totals add up exactly.

use rust_decimal::Decimal;

/// Price of `quantity` units.
#[must_use]
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Format an amount for display as US dollars, e.g. `$1,299.50`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(dec("9.99"), 3), dec("29.97"));
        assert_eq!(line_total(dec("9.99"), 0), Decimal::ZERO);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec("0")), "$0.00");
        assert_eq!(format_price(dec("9.9")), "$9.90");
        assert_eq!(format_price(dec("1299.5")), "$1,299.50");
        assert_eq!(format_price(dec("1234567.891")), "$1,234,567.89");
        assert_eq!(format_price(dec("-12.5")), "-$12.50");
    }
}
