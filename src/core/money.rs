use rust_decimal::{Decimal, RoundingStrategy};

/// Narrow no-break space, the fr-FR digit group separator and the
/// space between the amount and the euro sign.
const NNBSP: char = '\u{202F}';

/// Format an amount as French-locale euros with two decimals.
///
/// Grouping uses the narrow no-break space and the decimal separator
/// is a comma, matching `Intl.NumberFormat("fr-FR")` output:
/// `12 345,67 €`. Rounding is half-up away from zero.
///
/// # Examples
///
/// ```
/// use cascade_engine::core::money::format_eur;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_eur(dec!(1234.5)), "1\u{202F}234,50\u{202F}€");
/// assert_eq!(format_eur(dec!(-0.005)), "-0,01\u{202F}€");
/// ```
pub fn format_eur(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let (sign, integer, fraction) = split_parts(rounded, 2);
    format!("{}{},{}{}€", sign, group_thousands(&integer), fraction, NNBSP)
}

/// Format an amount as French-locale euros with no decimals,
/// for compact dashboard figures: `12 346 €`.
pub fn format_eur_whole(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let (sign, integer, _) = split_parts(rounded, 0);
    format!("{}{}{}€", sign, group_thousands(&integer), NNBSP)
}

/// Decompose an already-rounded decimal into sign, integer digits and
/// a fraction string of exactly `scale` digits.
fn split_parts(amount: Decimal, scale: u32) -> (&'static str, String, String) {
    let mut value = amount.abs();
    value.rescale(scale);
    let text = value.to_string();
    let sign = if amount.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    match text.split_once('.') {
        Some((int, frac)) => (sign, int.to_string(), frac.to_string()),
        None => (sign, text, String::new()),
    }
}

/// Insert the fr-FR group separator every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let count = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (count - i) % 3 == 0 {
            grouped.push(NNBSP);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_basic_format() {
        assert_eq!(format_eur(dec!(0)), "0,00\u{202F}€");
        assert_eq!(format_eur(dec!(12.3)), "12,30\u{202F}€");
        assert_eq!(format_eur(dec!(1234.56)), "1\u{202F}234,56\u{202F}€");
    }

    #[test]
    fn test_grouping_large_amounts() {
        assert_eq!(
            format_eur(dec!(1234567.89)),
            "1\u{202F}234\u{202F}567,89\u{202F}€"
        );
        assert_eq!(
            format_eur_whole(dec!(1234567.89)),
            "1\u{202F}234\u{202F}568\u{202F}€"
        );
    }

    #[test]
    fn test_negative_amounts_keep_minus() {
        assert_eq!(format_eur(dec!(-1500)), "-1\u{202F}500,00\u{202F}€");
        assert_eq!(format_eur_whole(dec!(-999.6)), "-1\u{202F}000\u{202F}€");
    }

    #[test]
    fn test_half_up_rounding() {
        assert_eq!(format_eur(dec!(0.005)), "0,01\u{202F}€");
        assert_eq!(format_eur(dec!(2.675)), "2,68\u{202F}€");
        assert_eq!(format_eur_whole(dec!(0.5)), "1\u{202F}€");
    }

    #[test]
    fn test_negative_rounding_to_zero_drops_sign() {
        assert_eq!(format_eur(dec!(-0.001)), "0,00\u{202F}€");
    }
}
