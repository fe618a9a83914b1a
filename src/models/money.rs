//! Money type for representing rupiah amounts
//!
//! Internally stores amounts in hundredths of a rupiah (i64) to avoid
//! floating-point drift when summing. On the wire (store documents) amounts
//! are plain JSON numbers in rupiah, which is what the web client writes.
//!
//! Parsed and decoded amounts are limited to [`Money::MAX_RUPIAH`] in either
//! direction, and arithmetic saturates instead of overflowing.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as hundredths of a rupiah
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest accepted amount in whole rupiah (one quadrillion)
    pub const MAX_RUPIAH: i64 = 1_000_000_000_000_000;

    const MAX_CENTS: i64 = Self::MAX_RUPIAH * 100;

    /// Accept `cents` only if it lies within [`Money::MAX_RUPIAH`]
    fn bounded(cents: i64) -> Option<Self> {
        (cents.unsigned_abs() <= Self::MAX_CENTS as u64).then_some(Self(cents))
    }

    /// Create a Money amount from hundredths of a rupiah
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole rupiah
    ///
    /// # Examples
    /// ```
    /// use wedding_planner::models::Money;
    /// let amount = Money::from_rupiah(1_500_000);
    /// assert_eq!(amount.to_string(), "Rp 1.500.000");
    /// ```
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Self(rupiah * 100)
    }

    /// Convert a floating-point rupiah value, rejecting NaN and infinities
    pub fn from_rupiah_f64(rupiah: f64) -> Option<Self> {
        if !rupiah.is_finite() {
            return None;
        }
        let cents = (rupiah * 100.0).round();
        if cents.abs() > Self::MAX_CENTS as f64 {
            return None;
        }
        Self::bounded(cents as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths of a rupiah
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount rounded to whole rupiah (half away from zero)
    pub const fn rupiah(&self) -> i64 {
        if self.0 < 0 {
            -(self.0.saturating_neg().saturating_add(50) / 100)
        } else {
            self.0.saturating_add(50) / 100
        }
    }

    /// Get the amount as floating-point rupiah
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// This amount as a percentage of `whole`; zero when `whole` is not positive
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_positive() {
            self.0 as f64 / whole.0 as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Parse a money amount from user input
    ///
    /// Accepts formats: "5000000", "5000000.50", "-250", "Rp 750000",
    /// "1500,5" (comma as decimal separator when no dot is present).
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped.trim_start())
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix("Rp")
            .or_else(|| s.strip_prefix("rp"))
            .unwrap_or(s)
            .trim();

        let s: String = s.chars().filter(|c| *c != '_' && *c != ' ').collect();
        let s = if s.contains('.') { s } else { s.replace(',', ".") };

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        let cents = if let Some((whole, frac)) = s.split_once('.') {
            if frac.contains('.') || !all_digits(whole) || !all_digits(frac) {
                return Err(MoneyParseError::InvalidFormat(original.to_string()));
            }

            let whole: i64 = if whole.is_empty() {
                0
            } else {
                whole
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(original.to_string()))?
            };

            // Pad or truncate the fraction to 2 digits
            let frac: i64 = match frac.len() {
                0 => 0,
                1 => frac.parse::<i64>().unwrap_or(0) * 10,
                _ => frac[..2].parse().unwrap_or(0),
            };

            whole
                .checked_mul(100)
                .and_then(|c| c.checked_add(frac))
                .ok_or_else(|| MoneyParseError::InvalidFormat(original.to_string()))?
        } else {
            if !all_digits(&s) {
                return Err(MoneyParseError::InvalidFormat(original.to_string()));
            }
            s.parse::<i64>()
                .ok()
                .and_then(|r| r.checked_mul(100))
                .ok_or_else(|| MoneyParseError::InvalidFormat(original.to_string()))?
        };

        Self::bounded(if negative { -cents } else { cents })
            .ok_or_else(|| MoneyParseError::InvalidFormat(original.to_string()))
    }
}

fn all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// Group whole rupiah with `.` as the thousands separator
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    /// Indonesian rupiah without fraction digits, e.g. `Rp 1.500.000`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rupiah = self.rupiah();
        let grouped = group_thousands(rupiah.unsigned_abs());
        if rupiah < 0 {
            write!(f, "-Rp {}", grouped)
        } else {
            write!(f, "Rp {}", grouped)
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a rupiah amount as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .and_then(Money::bounded)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .and_then(Money::bounded)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_rupiah_f64(v).ok_or_else(|| E::custom(format!("not a finite amount: {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Deserialize an amount that must not be negative
///
/// Used with `#[serde(deserialize_with = ...)]` on stored amounts so a
/// document carrying a negative or non-numeric amount fails to decode.
pub fn deserialize_non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    let money = Money::deserialize(deserializer)?;
    if money.is_negative() {
        return Err(de::Error::custom(format!("negative amount: {}", money)));
    }
    Ok(money)
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupiah() {
        let m = Money::from_rupiah(1500);
        assert_eq!(m.cents(), 150_000);
        assert_eq!(m.rupiah(), 1500);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupiah(1_500_000).to_string(), "Rp 1.500.000");
        assert_eq!(Money::from_rupiah(0).to_string(), "Rp 0");
        assert_eq!(Money::from_rupiah(999).to_string(), "Rp 999");
        assert_eq!(Money::from_rupiah(-2_500).to_string(), "-Rp 2.500");
        assert_eq!(Money::from_cents(149_950).to_string(), "Rp 1.500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupiah(1000);
        let b = Money::from_rupiah(500);

        assert_eq!(a + b, Money::from_rupiah(1500));
        assert_eq!(a - b, Money::from_rupiah(500));
        assert_eq!(-a, Money::from_rupiah(-1000));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("5000000").unwrap(), Money::from_rupiah(5_000_000));
        assert_eq!(Money::parse("Rp 750000").unwrap(), Money::from_rupiah(750_000));
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,25").unwrap().cents(), 1025);
        assert_eq!(Money::parse("-250").unwrap(), Money::from_rupiah(-250));
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
    }

    #[test]
    fn test_amount_limit() {
        let max = Money::MAX_RUPIAH.to_string();
        assert_eq!(Money::parse(&max).unwrap(), Money::from_rupiah(Money::MAX_RUPIAH));
        assert!(Money::parse("1000000000000001").is_err());
        assert!(Money::parse("-1000000000000001").is_err());
        assert!(Money::from_rupiah_f64(5e16).is_none());

        assert!(serde_json::from_str::<Money>("5e16").is_err());
        assert!(serde_json::from_str::<Money>("50000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("\"50000000000000000\"").is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let near_max = Money::from_cents(i64::MAX - 1);
        assert_eq!(near_max + Money::from_cents(10), Money::from_cents(i64::MAX));
        assert_eq!(-near_max - Money::from_cents(10), Money::from_cents(i64::MIN));

        let many = vec![Money::from_rupiah(Money::MAX_RUPIAH); 200];
        let total: Money = many.iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("-").is_err());
    }

    #[test]
    fn test_percent_of() {
        let planned = Money::from_rupiah(1_000_000);
        assert_eq!(Money::from_rupiah(950_000).percent_of(planned), 95.0);
        assert_eq!(Money::from_rupiah(500).percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_rupiah(100),
            Money::from_rupiah(200),
            Money::from_rupiah(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_rupiah(600));
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&Money::from_rupiah(5000)).unwrap(), "5000");
        assert_eq!(serde_json::to_string(&Money::from_cents(1050)).unwrap(), "10.5");

        let from_int: Money = serde_json::from_str("3000000").unwrap();
        assert_eq!(from_int, Money::from_rupiah(3_000_000));
        let from_float: Money = serde_json::from_str("10.5").unwrap();
        assert_eq!(from_float.cents(), 1050);
        let from_str: Money = serde_json::from_str("\"4500000\"").unwrap();
        assert_eq!(from_str, Money::from_rupiah(4_500_000));
        assert!(serde_json::from_str::<Money>("\"lima juta\"").is_err());
    }

    #[test]
    fn test_non_negative_deserializer() {
        #[derive(Deserialize)]
        struct Doc {
            #[serde(deserialize_with = "deserialize_non_negative")]
            amount: Money,
        }

        let ok: Doc = serde_json::from_str(r#"{"amount": 10}"#).unwrap();
        assert_eq!(ok.amount, Money::from_rupiah(10));
        assert!(serde_json::from_str::<Doc>(r#"{"amount": -10}"#).is_err());
    }
}
