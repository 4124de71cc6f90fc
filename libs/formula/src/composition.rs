use std::collections::BTreeMap;
use std::fmt;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::elements;
use crate::error::{Error, Result};

/// Flat element composition: element symbol to total amount.
///
/// Keys are always members of the periodic table and iterate in ascending
/// symbol order. Amounts are exact decimals and never negative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Composition {
    amounts: BTreeMap<&'static str, Decimal>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a composition from `(symbol, amount)` pairs, summing repeated
    /// symbols.
    pub fn from_amounts<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        let mut out = Self::new();
        for (symbol, amount) in pairs {
            let Some(symbol) = elements::lookup(symbol) else {
                return Err(Error::invalid_composition(format!(
                    "unknown element symbol '{symbol}'"
                )));
            };
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(Error::invalid_composition(format!(
                    "negative amount {amount} for '{symbol}'"
                )));
            }
            out.add(symbol, amount);
        }
        Ok(out)
    }

    pub(crate) fn add(&mut self, symbol: &'static str, amount: Decimal) {
        let total = self.amounts.entry(symbol).or_insert(Decimal::ZERO);
        *total = total.saturating_add(amount);
    }

    pub fn get(&self, symbol: &str) -> Option<Decimal> {
        self.amounts.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.amounts.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Element symbols in ascending order.
    pub fn elements(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.amounts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Decimal)> + '_ {
        self.amounts.iter().map(|(symbol, amount)| (*symbol, *amount))
    }

    /// Amounts as floating point, for callers that work in `f64`.
    pub fn to_f64_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter()
            .map(|(symbol, amount)| (symbol, amount.to_f64().unwrap_or(f64::NAN)))
            .collect()
    }

    /// Multiply every amount by `factor`.
    pub fn scale(&self, factor: Decimal) -> Composition {
        Composition {
            amounts: self
                .amounts
                .iter()
                .map(|(symbol, amount)| (*symbol, amount.saturating_mul(factor)))
                .collect(),
        }
    }

    /// True when some total overflowed during flattening.
    pub(crate) fn is_saturated(&self) -> bool {
        self.amounts.values().any(|amount| *amount == Decimal::MAX)
    }
}

impl fmt::Display for Composition {
    /// Writes the composition as a formula with coefficients of 1 omitted,
    /// e.g. `LiMn1.5Ni0.5O4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, amount) in self.iter() {
            f.write_str(symbol)?;
            if amount != Decimal::ONE {
                write!(f, "{}", amount.normalize())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_amounts_sums_repeats() {
        let comp =
            Composition::from_amounts([("O", dec("2")), ("Ti", dec("1")), ("O", dec("1"))])
                .unwrap();
        assert_eq!(comp.get("O"), Some(dec("3")));
        assert_eq!(comp.elements().collect::<Vec<_>>(), vec!["O", "Ti"]);
    }

    #[test]
    fn test_from_amounts_rejects_bad_input() {
        assert!(matches!(
            Composition::from_amounts([("Xx", dec("1"))]),
            Err(Error::InvalidComposition { .. })
        ));
        let err = Composition::from_amounts([("O", dec("-1"))]).unwrap_err();
        assert!(matches!(err, Error::InvalidComposition { .. }));
        assert_eq!(err.to_string(), "invalid composition: negative amount -1 for 'O'");
    }

    #[test]
    fn test_display() {
        let comp = Composition::from_amounts([
            ("Li", dec("1")),
            ("Ni", dec("0.50")),
            ("Mn", dec("1.5")),
            ("O", dec("4")),
        ])
        .unwrap();
        assert_eq!(comp.to_string(), "LiMn1.5Ni0.5O4");
    }

    #[test]
    fn test_scale() {
        let comp = Composition::from_amounts([("Ti", dec("1")), ("O", dec("2"))]).unwrap();
        let scaled = comp.scale(dec("2.5"));
        assert_eq!(scaled.get("Ti"), Some(dec("2.5")));
        assert_eq!(scaled.get("O"), Some(dec("5")));
        assert_eq!(scaled.to_f64_map()["O"], 5.0);
    }
}
