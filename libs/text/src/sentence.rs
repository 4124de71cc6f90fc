//! Token normalization for embedding corpora
//!
//! Prepares tokenized sentences for word-embedding training: numbers are
//! replaced with a placeholder, chemical formulas with their canonical form,
//! ordinary capitalized words are lowercased, and number+unit tokens such as
//! `300K` are split into the placeholder and the unit.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use matstract_formula::{is_element, is_simple_formula, normalize_to_canonical};

use crate::counts::MaterialCounts;
use crate::units::is_unit;

/// Placeholder substituted for numeric tokens.
pub const NUMBER_TOKEN: &str = "<nUm>";

/// Leading digits (or `.`/`?`) followed by Latin-script text, e.g. `2mol.`.
static NUMBER_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([\d.?]+)(\p{Latin}+.*)").expect("number/unit pattern is valid")
});

/// True when `token` reads as a number once `,` digit separators are removed.
pub fn is_number(token: &str) -> bool {
    token.replace(',', "").parse::<f64>().is_ok()
}

/// Strip accents: decompose, drop combining marks, recompose.
pub fn deaccent(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// At least one cased character and no uppercase ones.
fn is_lowercase_word(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            return false;
        }
        cased |= c.is_lowercase();
    }
    cased
}

/// One character, or an initial capital followed by lowercase text.
fn is_plain_word(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.as_str()) {
        (None, _) => false,
        (Some(_), "") => true,
        (Some(first), rest) => first.is_uppercase() && is_lowercase_word(rest),
    }
}

/// Rewrites sentences token by token and keeps a tally of the formula
/// mentions it canonicalized.
#[derive(Debug, Clone)]
pub struct SentenceProcessor {
    max_denominator: u32,
    counts: MaterialCounts,
}

impl SentenceProcessor {
    pub fn new(max_denominator: u32) -> Self {
        Self {
            max_denominator,
            counts: MaterialCounts::default(),
        }
    }

    /// Process one tokenized sentence. A number+unit token expands into two
    /// output tokens, so the result can be longer than the input.
    pub fn process_sentence<S: AsRef<str>>(&mut self, tokens: &[S]) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref();

            if is_number(token) {
                out.push(NUMBER_TOKEN.to_string());
            } else if is_simple_formula(token) {
                let formula = self.canonical_formula(token);
                self.counts.record(&formula, token);
                out.push(formula);
            } else if is_plain_word(token) && !is_element(token) && !is_unit(token) {
                out.push(deaccent(&token.to_lowercase()));
            } else {
                match NUMBER_UNIT.captures(token) {
                    Some(caps) if is_unit(&caps[2]) => {
                        out.push(NUMBER_TOKEN.to_string());
                        out.push(deaccent(&caps[2]));
                    }
                    _ => out.push(deaccent(token)),
                }
            }
        }
        out
    }

    /// Canonical form of a formula token; the token itself when it does not
    /// reduce to anything.
    fn canonical_formula(&self, token: &str) -> String {
        match normalize_to_canonical(token, self.max_denominator) {
            Ok(canonical) if !canonical.is_empty() => {
                tracing::debug!(token, canonical = %canonical, "canonicalized formula");
                canonical.into_string()
            }
            Ok(_) => token.to_string(),
            Err(err) => {
                tracing::debug!(token, error = %err, "keeping formula token as written");
                token.to_string()
            }
        }
    }

    /// Mentions recorded so far.
    pub fn material_counts(&self) -> &MaterialCounts {
        &self.counts
    }

    pub fn into_material_counts(self) -> MaterialCounts {
        self.counts
    }
}

impl Default for SentenceProcessor {
    fn default() -> Self {
        Self::new(matstract_formula::DEFAULT_MAX_DENOMINATOR)
    }
}
