//! Parsed formula tree
//!
//! A formula is a list of additive components (the main formula plus any
//! hydrate components). Each component is a group whose amount is the
//! component's leading coefficient.

use rust_decimal::Decimal;

use crate::composition::Composition;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormulaGroup {
    /// A single element with its amount (`O2`).
    Element {
        symbol: &'static str,
        amount: Decimal,
    },
    /// A parenthesized (or top-level) group; `amount` multiplies every child.
    Group {
        children: Vec<FormulaGroup>,
        amount: Decimal,
    },
}

impl FormulaGroup {
    pub fn amount(&self) -> Decimal {
        match self {
            FormulaGroup::Element { amount, .. } | FormulaGroup::Group { amount, .. } => *amount,
        }
    }

    /// Depth of the subtree; an element has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            FormulaGroup::Element { .. } => 0,
            FormulaGroup::Group { children, .. } => {
                1 + children.iter().map(FormulaGroup::depth).max().unwrap_or(0)
            }
        }
    }

    pub(crate) fn flatten_into(&self, multiplier: Decimal, out: &mut Composition) {
        match self {
            FormulaGroup::Element { symbol, amount } => {
                out.add(*symbol, amount.saturating_mul(multiplier))
            }
            FormulaGroup::Group { children, amount } => {
                let multiplier = multiplier.saturating_mul(*amount);
                for child in children {
                    child.flatten_into(multiplier, out);
                }
            }
        }
    }
}

/// A whole parsed formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaTree {
    pub components: Vec<FormulaGroup>,
}

impl FormulaTree {
    /// Flatten into element totals, summing the additive components.
    ///
    /// Totals that do not fit a `Decimal` saturate at `Decimal::MAX`.
    pub fn flatten(&self) -> Composition {
        let mut out = Composition::new();
        for component in &self.components {
            component.flatten_into(Decimal::ONE, &mut out);
        }
        out
    }

    /// Flatten, failing when some total does not fit a `Decimal`.
    pub fn try_flatten(&self) -> Result<Composition> {
        let composition = self.flatten();
        if composition.is_saturated() {
            return Err(Error::AmountOverflow);
        }
        Ok(composition)
    }

    /// True when the formula carries at least one hydrate component.
    pub fn is_hydrate(&self) -> bool {
        self.components.len() > 1
    }
}
