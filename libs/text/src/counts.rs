use std::collections::BTreeMap;

use serde::Serialize;

/// How often each surface form of a material was seen, grouped by its
/// canonical formula.
///
/// Serializes as `{"O2Ti": {"TiO2": 3, "Ti2O4": 1}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MaterialCounts {
    counts: BTreeMap<String, BTreeMap<String, usize>>,
}

impl MaterialCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one mention of `surface` that canonicalized to `canonical`.
    pub fn record(&mut self, canonical: &str, surface: &str) {
        *self
            .counts
            .entry(canonical.to_string())
            .or_default()
            .entry(surface.to_string())
            .or_insert(0) += 1;
    }

    /// Occurrences of `surface` under `canonical`.
    pub fn count(&self, canonical: &str, surface: &str) -> usize {
        self.counts
            .get(canonical)
            .and_then(|forms| forms.get(surface))
            .copied()
            .unwrap_or(0)
    }

    /// All mentions of a canonical formula, across surface forms.
    pub fn total(&self, canonical: &str) -> usize {
        self.counts
            .get(canonical)
            .map(|forms| forms.values().sum())
            .unwrap_or(0)
    }

    /// Surface forms recorded for a canonical formula, in ascending order.
    pub fn surface_forms(&self, canonical: &str) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts
            .get(canonical)
            .into_iter()
            .flat_map(|forms| forms.iter().map(|(form, n)| (form.as_str(), *n)))
    }

    /// Canonical formulas with at least one mention, in ascending order.
    pub fn materials(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: &MaterialCounts) {
        for (canonical, forms) in &other.counts {
            let into = self.counts.entry(canonical.clone()).or_default();
            for (form, n) in forms {
                *into.entry(form.clone()).or_insert(0) += n;
            }
        }
    }
}
