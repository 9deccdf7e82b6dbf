//! Amounts of money.
//!
//! Transaction values and wallet balances travel as decimal text with two
//! fraction digits (`"-30.00"`) and are stored as integer minor units. All
//! arithmetic on [`Money`] is checked: a sum that leaves the `i64` range is an
//! [`EngineError::InvalidAmount`], never a wrap or a panic.

use std::{fmt, iter, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

const FRACTION_DIGITS: usize = 2;

/// Signed amount in minor units. Positive is money in, negative money out.
///
/// ```rust
/// use engine::Money;
///
/// let lunch: Money = "-8,4".parse().unwrap();
/// assert_eq!(lunch.minor(), -840);
/// assert_eq!(lunch.to_string(), "-8.40");
/// assert!("8.405".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

fn out_of_range() -> EngineError {
    EngineError::InvalidAmount("amount out of range".to_string())
}

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Money) -> ResultEngine<Money> {
        self.0.checked_add(other.0).map(Money).ok_or_else(out_of_range)
    }

    pub fn checked_sub(self, other: Money) -> ResultEngine<Money> {
        self.0.checked_sub(other.0).map(Money).ok_or_else(out_of_range)
    }

    /// The movement that undoes this one on the same wallet.
    pub fn reversed(self) -> ResultEngine<Money> {
        self.0.checked_neg().map(Money).ok_or_else(out_of_range)
    }

    /// Values of the two legs of a transfer of `self`: the source wallet pays
    /// it, the destination wallet receives it.
    ///
    /// ```rust
    /// use engine::Money;
    ///
    /// let (source, destination) = Money::new(3_000).transfer_legs().unwrap();
    /// assert_eq!((source.minor(), destination.minor()), (-3_000, 3_000));
    /// ```
    pub fn transfer_legs(self) -> ResultEngine<(Money, Money)> {
        Ok((self.reversed()?, self))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Reads `[+|-]digits[(.|,)digits]` with at most two fraction digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = unsigned.split_once(['.', ',']).unwrap_or((unsigned, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(EngineError::InvalidAmount(format!("invalid amount: {text}")));
        }
        if fraction.len() > FRACTION_DIGITS {
            return Err(EngineError::InvalidAmount(format!(
                "at most {FRACTION_DIGITS} decimals allowed: {text}"
            )));
        }

        // "12,5" reads as the digits 1 2 5 0
        let padding = iter::repeat_n(b'0', FRACTION_DIGITS - fraction.len());
        let minor = whole
            .bytes()
            .chain(fraction.bytes())
            .chain(padding)
            .try_fold(0i64, |acc, digit| {
                acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
            })
            .ok_or_else(out_of_range)?;

        Ok(Money(if negative { -minor } else { minor }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ResultEngine<i64> {
        text.parse::<Money>().map(Money::minor)
    }

    #[test]
    fn formats_with_two_fraction_digits() {
        let shown: Vec<String> = [0, 7, 90, 1_050, -1_050, -5]
            .into_iter()
            .map(|minor| Money::new(minor).to_string())
            .collect();
        assert_eq!(shown, ["0.00", "0.07", "0.90", "10.50", "-10.50", "-0.05"]);
        assert_eq!(Money::new(i64::MIN).to_string(), "-92233720368547758.08");
    }

    #[test]
    fn reads_either_decimal_separator() {
        assert_eq!(parse("10").unwrap(), 1_000);
        assert_eq!(parse("10.5").unwrap(), 1_050);
        assert_eq!(parse("10,05").unwrap(), 1_005);
        assert_eq!(parse("10.").unwrap(), 1_000);
        assert_eq!(parse("-0,01").unwrap(), -1);
        assert_eq!(parse(" +3 ").unwrap(), 300);
    }

    #[test]
    fn refuses_malformed_text() {
        for text in ["", "  ", "-", "+", ".5", "1.2.3", "1,2.3", "--1", "1e3", "ten", "1 000"] {
            assert!(
                matches!(text.parse::<Money>(), Err(EngineError::InvalidAmount(_))),
                "{text:?} should be refused"
            );
        }
        assert!(parse("12.345").is_err());
        assert!(parse("0,001").is_err());
    }

    #[test]
    fn edge_of_range() {
        assert_eq!(parse("92233720368547758.07").unwrap(), i64::MAX);
        assert_eq!(parse("-92233720368547758.07").unwrap(), -i64::MAX);
        assert!(parse("92233720368547758.08").is_err());
        assert!(parse("99999999999999999999").is_err());
    }

    #[test]
    fn arithmetic_reports_overflow() {
        let top = Money::new(i64::MAX);
        assert_eq!(
            Money::new(100).checked_sub(Money::new(130)).unwrap(),
            Money::new(-30)
        );
        assert!(matches!(
            top.checked_add(Money::new(1)),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(Money::new(i64::MIN).checked_sub(Money::new(1)).is_err());
        assert!(Money::new(i64::MIN).reversed().is_err());
        assert_eq!(top.reversed().unwrap(), Money::new(-i64::MAX));
    }

    #[test]
    fn transfer_moves_money_from_source_to_destination() {
        let (source, destination) = Money::new(2_500).transfer_legs().unwrap();
        assert_eq!(source, Money::new(-2_500));
        assert_eq!(destination, Money::new(2_500));
        assert_eq!(source.checked_add(destination).unwrap(), Money::ZERO);
    }
}
