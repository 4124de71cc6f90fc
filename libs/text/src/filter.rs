//! Include/exclude material filter built from a search-box query.

use matstract_formula::normalize_to_canonical;

/// Materials a document must mention (any of `include`) or must not mention
/// (none of `exclude`).
///
/// Terms that parse as formulas are stored in canonical form so that
/// `TiO2` and `Ti2O4` select the same documents; other terms are kept as
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl MaterialFilter {
    /// Build a filter from a whitespace-separated query such as
    /// `"TiO2, ZnO -SiO2"`. A trailing `,` on a term is ignored and a
    /// leading `-` turns the term into an exclusion.
    pub fn from_query(query: &str, max_denominator: u32) -> Self {
        let mut filter = Self::default();
        for term in query.split_whitespace() {
            let term = term.strip_suffix(',').unwrap_or(term);
            let (term, excluded) = match term.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (term, false),
            };
            if term.is_empty() {
                continue;
            }

            let material = match normalize_to_canonical(term, max_denominator) {
                Ok(canonical) if !canonical.is_empty() => canonical.into_string(),
                _ => term.to_string(),
            };
            tracing::trace!(term, material = %material, excluded, "filter term");

            if excluded {
                filter.exclude.push(material);
            } else {
                filter.include.push(material);
            }
        }
        filter
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// True when the query had no usable terms.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Evaluate the filter against the canonical materials mentioned by one
    /// document.
    pub fn admits<I, S>(&self, materials: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut included = self.include.is_empty();
        for material in materials {
            let material = material.as_ref();
            if self.exclude.iter().any(|m| m == material) {
                return false;
            }
            included |= self.include.iter().any(|m| m == material);
        }
        included
    }
}
