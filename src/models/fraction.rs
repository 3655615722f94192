use crate::error::RouteError;
use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exact rational used for price-ratio comparisons.
///
/// Values are kept unreduced: subtraction multiplies denominators and
/// comparisons cross-multiply, so a zero denominator never panics. The sign
/// always lives on the numerator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFraction", into = "RawFraction")]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

/// A ratio of two amounts. Same arithmetic as [`Fraction`].
pub type Percent = Fraction;

impl Fraction {
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator.sign() == Sign::Minus {
            Self {
                numerator: -numerator,
                denominator: -denominator,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        }
    }

    /// Like [`Fraction::new`] but rejects a zero denominator.
    pub fn checked_new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, RouteError> {
        let fraction = Self::new(numerator, denominator);
        if fraction.denominator.sign() == Sign::NoSign {
            return Err(RouteError::ZeroDenominator(fraction.to_string()));
        }
        Ok(fraction)
    }

    pub fn from_bips(bips: i64) -> Self {
        Self::new(bips, 10_000)
    }

    /// `numerator / denominator` for two raw token amounts.
    pub fn percent(numerator: &BigUint, denominator: &BigUint) -> Percent {
        Self::new(
            BigInt::from(numerator.clone()),
            BigInt::from(denominator.clone()),
        )
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn subtract(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction::new(
                &self.numerator - &other.numerator,
                self.denominator.clone(),
            );
        }
        Fraction::new(
            &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }

    pub fn less_than(&self, other: &Fraction) -> bool {
        &self.numerator * &other.denominator < &other.numerator * &self.denominator
    }

    pub fn greater_than(&self, other: &Fraction) -> bool {
        &self.numerator * &other.denominator > &other.numerator * &self.denominator
    }

    pub fn equal_to(&self, other: &Fraction) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// JSON form: decimal strings so numerators of any size survive.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawFraction {
    numerator: String,
    denominator: String,
}

impl TryFrom<RawFraction> for Fraction {
    type Error = RouteError;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        let numerator: BigInt = raw
            .numerator
            .trim()
            .parse()
            .map_err(|_| RouteError::InvalidAmount(raw.numerator.clone()))?;
        let denominator: BigInt = raw
            .denominator
            .trim()
            .parse()
            .map_err(|_| RouteError::InvalidAmount(raw.denominator.clone()))?;
        Fraction::checked_new(numerator, denominator)
    }
}

impl From<Fraction> for RawFraction {
    fn from(f: Fraction) -> Self {
        Self {
            numerator: f.numerator.to_string(),
            denominator: f.denominator.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_denominator_moves_sign() {
        let f = Fraction::new(3, -4);
        assert_eq!(f.numerator(), &BigInt::from(-3));
        assert_eq!(f.denominator(), &BigInt::from(4));
        assert!(f.less_than(&Fraction::new(0, 1)));
    }

    #[test]
    fn test_subtract_and_compare() {
        let ratio = Fraction::new(1000, 999);
        let adjusted = ratio.subtract(&Fraction::from_bips(1));
        // 1000/999 - 1/10000 = 9_999_001 / 9_990_000
        assert!(adjusted.equal_to(&Fraction::new(9_999_001, 9_990_000)));
        assert!(adjusted.greater_than(&Fraction::new(1, 1)));
        assert!(adjusted.less_than(&Fraction::from_bips(10_010)));
    }

    #[test]
    fn test_subtract_same_denominator() {
        let f = Fraction::from_bips(50).subtract(&Fraction::from_bips(1));
        assert_eq!(f, Fraction::from_bips(49));
    }

    #[test]
    fn test_zero_denominator_does_not_panic() {
        let f = Fraction::percent(&BigUint::from(5u8), &BigUint::from(0u8));
        assert!(!f.less_than(&Fraction::from_bips(50)));
        assert!(Fraction::checked_new(1, 0).is_err());
    }

    #[test]
    fn test_json_round_trip_and_rejects_zero_denominator() {
        let json = serde_json::to_string(&Fraction::from_bips(50)).unwrap();
        assert_eq!(json, r#"{"numerator":"50","denominator":"10000"}"#);
        let back: Fraction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Fraction::from_bips(50));

        let bad = serde_json::from_str::<Fraction>(r#"{"numerator":"1","denominator":"0"}"#);
        assert!(bad.is_err());
    }
}
