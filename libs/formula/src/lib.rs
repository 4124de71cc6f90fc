//! Chemical formula parsing and canonical normalization.
//!
//! ```
//! use matstract_formula::{normalize_to_canonical, parse, DEFAULT_MAX_DENOMINATOR};
//!
//! let composition = parse("Si(OH)4").unwrap();
//! assert_eq!(composition.len(), 3);
//!
//! let canonical = normalize_to_canonical("TiO2", DEFAULT_MAX_DENOMINATOR).unwrap();
//! assert_eq!(canonical, "O2Ti");
//! ```

#![forbid(unsafe_code)]

mod ast;
mod classify;
mod composition;
mod elements;
mod error;
pub mod lexer;
mod normalize;
pub mod parser;
pub mod token;

pub use ast::{FormulaGroup, FormulaTree};
pub use classify::is_simple_formula;
pub use composition::Composition;
pub use elements::is_element;
pub use error::{Error, Result};
pub use lexer::Lexer;
pub use normalize::{normalize, CanonicalFormula, DEFAULT_MAX_DENOMINATOR};
pub use parser::{ParseOptions, Parser, DEFAULT_MAX_DEPTH};

/// Parse a formula into its flat composition.
pub fn parse(text: &str) -> Result<Composition> {
    parse_with(text, &ParseOptions::default())
}

/// Parse a formula with explicit parser options.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Composition> {
    parse_tree_with(text, options)?.try_flatten()
}

/// Parse a formula, keeping its group structure.
pub fn parse_tree(text: &str) -> Result<FormulaTree> {
    parse_tree_with(text, &ParseOptions::default())
}

pub fn parse_tree_with(text: &str, options: &ParseOptions) -> Result<FormulaTree> {
    Parser::with_options(text, *options)?.parse()
}

/// Flatten a parsed tree into element totals.
pub fn flatten(tree: &FormulaTree) -> Composition {
    tree.flatten()
}

/// Parse `text` and reduce it to its canonical formula.
pub fn normalize_to_canonical(text: &str, max_denominator: u32) -> Result<CanonicalFormula> {
    let composition = parse(text)?;
    Ok(normalize(&composition, max_denominator))
}
