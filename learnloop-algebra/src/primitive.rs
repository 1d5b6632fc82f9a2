//! Functions to construct [`Integer`]s and [`Rational`]s from various types.

use rug::{ops::Pow, Integer, Rational};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Returns true if the rational has no fractional part.
pub fn is_integer(n: &Rational) -> bool {
    *n.denom() == 1
}

/// Parses a decimal literal such as `16`, `3.14`, `3.` or `.5` into an exact [`Rational`].
///
/// Returns [`None`] if the literal contains anything other than ASCII digits and at most one
/// decimal point.
pub fn rational_from_str(s: &str) -> Option<Rational> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let digits = format!("{}{}", whole, fraction);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let numerator = Integer::from_str_radix(&digits, 10).ok()?;
    let denominator = int(10).pow(u32::try_from(fraction.len()).ok()?);
    Some(Rational::from((numerator, denominator)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn integer_literal() {
        assert_eq!(rational_from_str("144"), Some(rat(144)));
    }

    #[test]
    fn decimal_literal_is_exact() {
        assert_eq!(rational_from_str("0.5"), Some(rat((1, 2))));
        assert_eq!(rational_from_str("3.14"), Some(rat((157, 50))));
        assert_eq!(rational_from_str(".25"), Some(rat((1, 4))));
        assert_eq!(rational_from_str("3."), Some(rat(3)));
    }

    #[test]
    fn integer_check() {
        assert!(is_integer(&rat(-4)));
        assert!(is_integer(&rat((6, 3))));
        assert!(!is_integer(&rat((1, 2))));
    }

    #[test]
    fn malformed_literal() {
        assert_eq!(rational_from_str("."), None);
        assert_eq!(rational_from_str("1.2.3"), None);
        assert_eq!(rational_from_str("1e5"), None);
    }
}
