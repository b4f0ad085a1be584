use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Errors produced while parsing a user-typed amount.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("too many decimals")]
    TooManyDecimals,
    #[error("amount too large")]
    Overflow,
}

/// Signed money amount represented as **integer cents**.
///
/// The backend speaks plain JSON numbers (`12.5`), so the wire format is a
/// float; in memory everything is cents, which keeps sums such as net worth
/// exact. `+`, `-` and [`Sum`] saturate at the `i64` cent range; use
/// [`Amount::checked_add`] / [`Amount::checked_sub`] to detect overflow.
///
/// # Examples
///
/// ```rust
/// use api_types::Amount;
///
/// let amount = Amount::from_cents(12_34);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!("10,5".parse::<Amount>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a decimal value, rounding half away from zero to the cent.
    ///
    /// Rounding works on the shortest decimal form of `value` (`1.005` is
    /// 101 cents even though the nearest `f64` is slightly below it).
    /// Returns `None` for NaN, infinities and values outside the `i64` cent
    /// range.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        round_decimal(&value.to_string()).map(Self)
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }
}

/// Cents of a plain decimal string (`-12.345`), half away from zero.
fn round_decimal(repr: &str) -> Option<i64> {
    let (negative, digits) = match repr.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, repr),
    };
    let (units, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut frac = fraction.bytes().map(|b| i64::from(b - b'0'));
    let tens = frac.next().unwrap_or(0);
    let ones = frac.next().unwrap_or(0);
    let round_up = frac.next().is_some_and(|digit| digit >= 5);

    let cents = units
        .parse::<i64>()
        .ok()?
        .checked_mul(100)?
        .checked_add(tens * 10 + ones + i64::from(round_up))?;
    Some(if negative { -cents } else { cents })
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator, an optional leading `+`/`-`
    /// and at most two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim())
        } else {
            (false, trimmed)
        };
        if rest.is_empty() {
            return Err(AmountError::Empty);
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units = parts.next().ok_or(AmountError::Invalid)?;
        let fraction = parts.next();
        if parts.next().is_some() {
            return Err(AmountError::Invalid);
        }

        if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::Invalid);
        }
        let units: i64 = units.parse().map_err(|_| AmountError::Overflow)?;

        let cents: i64 = match fraction {
            None | Some("") => 0,
            Some(frac) if !frac.chars().all(|c| c.is_ascii_digit()) => {
                return Err(AmountError::Invalid);
            }
            Some(frac) if frac.len() == 1 => frac.parse::<i64>().map_err(|_| AmountError::Invalid)? * 10,
            Some(frac) if frac.len() == 2 => frac.parse::<i64>().map_err(|_| AmountError::Invalid)?,
            Some(_) => return Err(AmountError::TooManyDecimals),
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or(AmountError::Overflow)?;

        Ok(Amount(if negative { -total } else { total }))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::from_f64(value)
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_cents() {
        assert_eq!(Amount::ZERO.to_string(), "0.00");
        assert_eq!(Amount::from_cents(1).to_string(), "0.01");
        assert_eq!(Amount::from_cents(1050).to_string(), "10.50");
        assert_eq!(Amount::from_cents(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<Amount>().unwrap().cents(), -1);
        assert_eq!(" +2.30 ".parse::<Amount>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert_eq!("-".parse::<Amount>(), Err(AmountError::Empty));
        assert_eq!("1.2.3".parse::<Amount>(), Err(AmountError::Invalid));
        assert_eq!("abc".parse::<Amount>(), Err(AmountError::Invalid));
        assert_eq!("12.345".parse::<Amount>(), Err(AmountError::TooManyDecimals));
    }

    #[test]
    fn json_numbers_round_to_cents() {
        let amount: Amount = serde_json::from_str("19.999").unwrap();
        assert_eq!(amount.cents(), 2000);
        let amount: Amount = serde_json::from_str("250").unwrap();
        assert_eq!(amount.cents(), 25_000);
        assert_eq!(serde_json::to_string(&Amount::from_cents(1234)).unwrap(), "12.34");
    }

    #[test]
    fn sum_of_floats_is_exact() {
        let parts = ["0.1", "0.2", "0.3"]
            .iter()
            .map(|raw| serde_json::from_str::<Amount>(raw).unwrap());
        assert_eq!(parts.sum::<Amount>(), Amount::from_cents(60));
        assert_eq!(std::iter::empty::<Amount>().sum::<Amount>().to_string(), "0.00");
    }

    #[test]
    fn json_numbers_round_half_away_from_zero() {
        let cents = |raw: &str| serde_json::from_str::<Amount>(raw).unwrap().cents();
        assert_eq!(cents("1.005"), 101);
        assert_eq!(cents("-1.005"), -101);
        assert_eq!(cents("2.675"), 268);
        assert_eq!(cents("0.125"), 13);
        assert_eq!(cents("0.0000001"), 0);
        assert_eq!(cents("6e16"), 6_000_000_000_000_000_000);
        assert!(serde_json::from_str::<Amount>("1e300").is_err());
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let big = Amount::from_cents(i64::MAX - 10);
        assert_eq!(big.checked_add(Amount::from_cents(11)), None);
        assert_eq!(
            big.checked_add(Amount::from_cents(10)),
            Some(Amount::from_cents(i64::MAX))
        );
        assert_eq!(Amount::from_cents(i64::MIN).checked_sub(Amount::from_cents(1)), None);

        assert_eq!(big + big, Amount::from_cents(i64::MAX));
        assert_eq!(Amount::from_cents(-i64::MAX) - big, Amount::from_cents(i64::MIN));
        assert_eq!([big, big, big].into_iter().sum::<Amount>(), Amount::from_cents(i64::MAX));
    }
}
