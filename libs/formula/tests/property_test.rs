//! Property-based tests using QuickCheck

use matstract_formula::lexer::Lexer;
use matstract_formula::token::TokenType;
use matstract_formula::{
    normalize, normalize_to_canonical, parse, Composition, DEFAULT_MAX_DENOMINATOR,
};
use quickcheck::{QuickCheck, TestResult};
use rust_decimal::Decimal;

const SYMBOLS: [&str; 16] = [
    "H", "Li", "C", "N", "O", "F", "Na", "Mg", "Si", "P", "S", "Cl", "Fe", "Co", "Ni", "Cu",
];

/// Build a composition with integer amounts from arbitrary input
fn composition(raw: &[(u8, u8)]) -> Option<Composition> {
    if raw.is_empty() {
        return None;
    }
    let pairs = raw.iter().map(|(symbol, amount)| {
        (
            SYMBOLS[*symbol as usize % SYMBOLS.len()],
            Decimal::from(u32::from(*amount % 50) + 1),
        )
    });
    Composition::from_amounts(pairs).ok()
}

/// Property: a canonical formula canonicalizes to itself
#[test]
fn prop_canonical_is_idempotent() {
    fn prop(raw: Vec<(u8, u8)>) -> TestResult {
        let Some(comp) = composition(&raw) else {
            return TestResult::discard();
        };
        let first = normalize(&comp, DEFAULT_MAX_DENOMINATOR);
        match normalize_to_canonical(first.as_str(), DEFAULT_MAX_DENOMINATOR) {
            Ok(second) => TestResult::from_bool(first == second),
            Err(_) => TestResult::failed(),
        }
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(u8, u8)>) -> TestResult);
}

/// Property: scaling every amount by the same positive factor does not
/// change the canonical formula
#[test]
fn prop_scale_invariance() {
    fn prop(raw: Vec<(u8, u8)>, numerator: u8, scale: u8) -> TestResult {
        let Some(comp) = composition(&raw) else {
            return TestResult::discard();
        };
        // factors such as 3, 0.7 or 0.13: denominators stay within the bound
        let factor = Decimal::new(i64::from(numerator % 20) + 1, u32::from(scale % 3));
        let scaled = comp.scale(factor);
        TestResult::from_bool(
            normalize(&scaled, DEFAULT_MAX_DENOMINATOR)
                == normalize(&comp, DEFAULT_MAX_DENOMINATOR),
        )
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(u8, u8)>, u8, u8) -> TestResult);
}

/// Property: canonical output lists symbols in ascending order
#[test]
fn prop_canonical_symbols_sorted() {
    fn prop(raw: Vec<(u8, u8)>) -> TestResult {
        let Some(comp) = composition(&raw) else {
            return TestResult::discard();
        };
        let canonical = normalize(&comp, DEFAULT_MAX_DENOMINATOR);
        let Ok(tokens) = Lexer::new(canonical.as_str()).tokenize() else {
            return TestResult::failed();
        };
        let symbols: Vec<&str> = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::Element)
            .map(|t| t.value.as_str())
            .collect();
        TestResult::from_bool(
            symbols.len() == comp.len() && symbols.windows(2).all(|w| w[0] < w[1]),
        )
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<(u8, u8)>) -> TestResult);
}

/// Property: the same element set survives canonicalization
/// Using manual test cases for hydrates and nested groups
#[test]
fn prop_elements_preserved() {
    let test_cases = vec![
        "TiO2",
        "Li(Ni0.5Mn1.5)O4",
        "CuSO4.5H2O",
        "Ca3(PO4)2",
        "K4(Fe(CN)6)",
        "MgSO4·7H2O",
        "Li0.33CoO2",
        "Fe0.9999Mn0.0001O",
    ];

    for formula in test_cases {
        let parsed = parse(formula).unwrap();
        let canonical = normalize_to_canonical(formula, DEFAULT_MAX_DENOMINATOR).unwrap();
        let reparsed = parse(canonical.as_str()).unwrap();
        assert_eq!(
            parsed.elements().collect::<Vec<_>>(),
            reparsed.elements().collect::<Vec<_>>(),
            "element set changed for {formula}"
        );
    }
}
