use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Boolean role of a query node when the server combines matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Logic {
    Must,
    MustNot,
    Should,
    Optional,
}

/// Leaf predicate against a single document field.
///
/// A filter can match an exact value, a range, or mere existence of the
/// field, and may carry nested sub-filters combined under its own logic.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub logic: Option<Logic>,
    pub weight: Option<f64>,
    pub exists: Option<bool>,
    pub equal: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub exclude: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Filter>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logic(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn exists(mut self, exists: bool) -> Self {
        self.exists = Some(exists);
        self
    }

    pub fn equal(mut self, value: impl Into<String>) -> Self {
        self.equal = Some(value.into());
        self
    }

    pub fn min(mut self, value: impl ToString) -> Self {
        self.min = Some(value.to_string());
        self
    }

    pub fn max(mut self, value: impl ToString) -> Self {
        self.max = Some(value.to_string());
        self
    }

    /// Invert this filter: matching records are excluded instead.
    pub fn exclude(mut self, exclude: bool) -> Self {
        self.exclude = Some(exclude);
        self
    }

    /// Add a nested sub-filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter.push(filter);
        self
    }
}

/// Predicate against a chemical formula field.
///
/// Unlike [Filter], equality is interpreted by the server with chemical
/// semantics (element ordering, stoichiometry, wildcard elements).
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChemicalFilter {
    pub logic: Option<Logic>,
    pub weight: Option<f64>,
    pub equal: Option<String>,
    pub exclude: Option<bool>,
}

impl ChemicalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logic(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn equal(mut self, formula: impl Into<String>) -> Self {
        self.equal = Some(formula.into());
        self
    }

    pub fn exclude(mut self, exclude: bool) -> Self {
        self.exclude = Some(exclude);
        self
    }
}
