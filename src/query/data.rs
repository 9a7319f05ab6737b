use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{DatasetQuery, FileQuery, Logic, PifSystemQuery};

/// Composite query over datasets, PIF systems and dataset files.
///
/// `simple` is a free-text shortcut translated server-side into
/// structured field matches; `simple_weight` boosts individual fields
/// (by dotted path) within that translation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQuery {
    pub logic: Option<Logic>,
    pub simple: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub simple_weight: HashMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dataset: Vec<DatasetQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub system: Vec<PifSystemQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file: Vec<FileQuery>,
}

impl DataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logic(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn simple(mut self, simple: impl Into<String>) -> Self {
        self.simple = Some(simple.into());
        self
    }

    /// Boost a field (dotted path, e.g. `"system.names"`) within the
    /// simple-query translation.
    pub fn simple_weight(mut self, field: impl Into<String>, weight: f64) -> Self {
        self.simple_weight.insert(field.into(), weight);
        self
    }

    pub fn dataset(mut self, query: DatasetQuery) -> Self {
        self.dataset.push(query);
        self
    }

    pub fn system(mut self, query: PifSystemQuery) -> Self {
        self.system.push(query);
        self
    }

    pub fn file(mut self, query: FileQuery) -> Self {
        self.file.push(query);
        self
    }
}
