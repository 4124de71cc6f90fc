//! Heuristic gate deciding whether a token is worth treating as a formula.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::elements;

/// Roman-numeral oxidation states, `(I)` through `(IV)`.
static OXIDATION_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(I+V?\)").expect("oxidation state pattern is valid"));

/// True when `text` looks like a simple chemical formula.
///
/// The token must not carry an oxidation state such as `(III)`, must contain
/// a digit or a lowercase letter (so abbreviations like `PV` are skipped),
/// must parse, and must name at least two distinct elements.
pub fn is_simple_formula(text: &str) -> bool {
    if OXIDATION_STATE.is_match(text) {
        return false;
    }
    if !text.chars().any(|c| c.is_numeric() || c.is_lowercase()) {
        return false;
    }

    match crate::parse(text) {
        Ok(composition) => {
            composition.len() >= 2 && composition.elements().all(elements::is_element)
        }
        Err(err) => {
            tracing::trace!(token = text, error = %err, "not a formula");
            false
        }
    }
}
