use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{ChemicalFilter, Filter, Logic};

/// One or more filters against a single document field, plus metadata
/// controlling relevance weight and value extraction.
///
/// `extract_as` labels the matched value in the hit's `extracted` map;
/// the label is chosen by the caller and echoed back verbatim.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldQuery {
    pub logic: Option<Logic>,
    pub weight: Option<f64>,
    pub simple: Option<String>,
    pub extract_as: Option<String>,
    pub extract_all: Option<bool>,
    pub extract_when_missing: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Filter>,
}

impl FieldQuery {
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

    /// Free-text query against this field only.
    pub fn simple(mut self, simple: impl Into<String>) -> Self {
        self.simple = Some(simple.into());
        self
    }

    /// Label under which the matched value appears in hit `extracted` maps.
    pub fn extract_as(mut self, label: impl Into<String>) -> Self {
        self.extract_as = Some(label.into());
        self
    }

    /// Extract every matching value rather than the first.
    pub fn extract_all(mut self, extract_all: bool) -> Self {
        self.extract_all = Some(extract_all);
        self
    }

    /// Value to report when extraction finds nothing.
    pub fn extract_when_missing(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.extract_when_missing = Some(value.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter.push(filter);
        self
    }
}

/// [FieldQuery] counterpart for chemical formula fields.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChemicalFieldQuery {
    pub logic: Option<Logic>,
    pub weight: Option<f64>,
    pub simple: Option<String>,
    pub extract_as: Option<String>,
    pub extract_all: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<ChemicalFilter>,
}

impl ChemicalFieldQuery {
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

    pub fn simple(mut self, simple: impl Into<String>) -> Self {
        self.simple = Some(simple.into());
        self
    }

    pub fn extract_as(mut self, label: impl Into<String>) -> Self {
        self.extract_as = Some(label.into());
        self
    }

    pub fn extract_all(mut self, extract_all: bool) -> Self {
        self.extract_all = Some(extract_all);
        self
    }

    pub fn filter(mut self, filter: ChemicalFilter) -> Self {
        self.filter.push(filter);
        self
    }
}
