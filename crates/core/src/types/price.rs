//! Price arithmetic and display formatting.
//!
//! Prices are plain `Decimal` amounts in rupees. The shop sells in a single
//! currency, so there is no currency code attached; formatting for display
//! lives here so the cart page and the product pages render the same way.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol used on every rendered price.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Price of `quantity` units at `unit_price`.
///
/// Saturates at `Decimal::MAX` (or `Decimal::MIN`) instead of overflowing.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price.saturating_mul(Decimal::from(quantity))
}

/// Format an amount as Indian Rupees for display (e.g. `₹1,499.00`).
///
/// Always renders two decimal places and groups the integer part in
/// thousands with commas.
///
/// ```rust
/// use gamearena_core::format_inr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_inr(Decimal::new(549_500, 2)), "₹5,495.00");
/// assert_eq!(format_inr(Decimal::ZERO), "₹0.00");
/// ```
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!(
        "{sign}{CURRENCY_SYMBOL}{}.{fraction}",
        group_thousands(integer)
    )
}

/// Insert a comma between every group of three digits, from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr_small_amounts() {
        assert_eq!(format_inr(Decimal::new(999, 0)), "₹999.00");
        assert_eq!(format_inr(Decimal::new(5, 1)), "₹0.50");
    }

    #[test]
    fn test_format_inr_groups_thousands() {
        assert_eq!(format_inr(Decimal::new(1499, 0)), "₹1,499.00");
        assert_eq!(format_inr(Decimal::new(123_456_789, 2)), "₹1,234,567.89");
        assert_eq!(format_inr(Decimal::new(100_000, 0)), "₹100,000.00");
    }

    #[test]
    fn test_format_inr_rounds_to_two_places() {
        assert_eq!(format_inr(Decimal::new(19_995, 3)), "₹20.00");
        assert_eq!(format_inr(Decimal::new(12_344, 3)), "₹12.34");
    }

    #[test]
    fn test_format_inr_negative() {
        assert_eq!(format_inr(Decimal::new(-250_050, 2)), "-₹2,500.50");
    }

    #[test]
    fn test_line_total_saturates() {
        let huge = Decimal::from_i128_with_scale(70_000_000_000_000_000_000_000_000_000, 0);
        assert_eq!(line_total(huge, 2), Decimal::MAX);
        assert_eq!(line_total(-huge, 2), Decimal::MIN);
        assert_eq!(format_inr(line_total(huge, u32::MAX)).chars().next(), Some('₹'));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(Decimal::new(250, 0), 2), Decimal::new(500, 0));
        assert_eq!(line_total(Decimal::new(1999, 2), 3), Decimal::new(5997, 2));
    }
}
