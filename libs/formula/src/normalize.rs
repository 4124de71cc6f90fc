//! Canonical minimal-integer formulas
//!
//! Amounts are approximated by bounded-denominator rationals, divided by the
//! rational GCD of all amounts and written out in ascending symbol order.

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;

use crate::composition::Composition;

/// Denominator bound used when no other is given.
pub const DEFAULT_MAX_DENOMINATOR: u32 = 1000;

/// Canonical formula string, e.g. `Li2Mn3NiO8`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct CanonicalFormula(String);

impl CanonicalFormula {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalFormula {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CanonicalFormula> for String {
    fn from(formula: CanonicalFormula) -> Self {
        formula.0
    }
}

impl PartialEq<str> for CanonicalFormula {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalFormula {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Reduce a composition to its canonical formula.
///
/// Each amount is replaced by the closest rational with a denominator of at
/// most `max_denominator` (values below 1 count as 1), the amounts are
/// divided by their GCD and rounded, and symbols are sorted. A count of 1 is
/// omitted; every other count is written out, including `0` for elements
/// whose approximation is zero (`FeMn0`).
pub fn normalize(composition: &Composition, max_denominator: u32) -> CanonicalFormula {
    let bound = BigInt::from(max_denominator.max(1));

    let approximations: Vec<(&'static str, BigRational)> = composition
        .iter()
        .map(|(symbol, amount)| {
            (
                symbol,
                limit_denominator(&decimal_to_rational(amount), &bound),
            )
        })
        .collect();

    let Some(divisor) = rational_gcd(approximations.iter().map(|(_, approx)| approx)) else {
        return CanonicalFormula::default();
    };

    let mut out = String::new();
    for (symbol, approx) in &approximations {
        // All amounts zero: nothing to divide by
        let count = if divisor.is_zero() {
            BigInt::zero()
        } else {
            (approx / &divisor).round().to_integer()
        };
        out.push_str(symbol);
        if !count.is_one() {
            out.push_str(&count.to_string());
        }
    }
    CanonicalFormula(out)
}

/// Exact rational value of a decimal.
pub(crate) fn decimal_to_rational(value: Decimal) -> BigRational {
    let numer = BigInt::from(value.mantissa());
    let denom = BigInt::from(10u8).pow(value.scale());
    BigRational::new(numer, denom)
}

/// Closest rational to `value` whose denominator is at most `max_denominator`.
///
/// Walks the continued-fraction convergents of `value` and picks between
/// the last convergent within the bound and the best semiconvergent.
pub(crate) fn limit_denominator(value: &BigRational, max_denominator: &BigInt) -> BigRational {
    if value.denom() <= max_denominator {
        return value.clone();
    }

    let (mut p0, mut q0) = (BigInt::zero(), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::zero());
    let (mut n, mut d) = (value.numer().clone(), value.denom().clone());

    loop {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if &q2 > max_denominator {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let rem = &n - &a * &d;
        n = std::mem::replace(&mut d, rem);
    }

    let k = (max_denominator - &q0).div_floor(&q1);
    let semiconvergent = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let convergent = BigRational::new(p1, q1);

    if (&convergent - value).abs() <= (&semiconvergent - value).abs() {
        convergent
    } else {
        semiconvergent
    }
}

/// Greatest common divisor of non-negative rationals in lowest terms:
/// `gcd(numerators) / lcm(denominators)`. Zeros do not change the result
/// unless every value is zero.
pub(crate) fn rational_gcd<'a, I>(values: I) -> Option<BigRational>
where
    I: IntoIterator<Item = &'a BigRational>,
{
    values.into_iter().fold(None, |acc, value| {
        Some(match acc {
            None => value.clone(),
            Some(g) => BigRational::new(
                g.numer().gcd(value.numer()),
                g.denom().lcm(value.denom()),
            ),
        })
    })
}
