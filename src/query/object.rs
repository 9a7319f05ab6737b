//! Object queries: named sub-field to query mappings for each domain
//! object the search endpoints understand.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{ChemicalFieldQuery, FieldQuery, Filter, Logic};

/// Query against a PIF system record.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PifSystemQuery {
    pub logic: Option<Logic>,
    pub weight: Option<f64>,
    pub simple: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uid: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updated_at: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chemical_formula: Vec<ChemicalFieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<FieldQuery>,
}

impl PifSystemQuery {
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

    pub fn uid(mut self, filter: Filter) -> Self {
        self.uid.push(filter);
        self
    }

    pub fn updated_at(mut self, filter: Filter) -> Self {
        self.updated_at.push(filter);
        self
    }

    pub fn names(mut self, query: FieldQuery) -> Self {
        self.names.push(query);
        self
    }

    pub fn ids(mut self, query: FieldQuery) -> Self {
        self.ids.push(query);
        self
    }

    pub fn chemical_formula(mut self, query: ChemicalFieldQuery) -> Self {
        self.chemical_formula.push(query);
        self
    }

    pub fn properties(mut self, query: PropertyQuery) -> Self {
        self.properties.push(query);
        self
    }

    pub fn tags(mut self, query: FieldQuery) -> Self {
        self.tags.push(query);
        self
    }
}

/// Query against a property of a PIF system (name, value, units).
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyQuery {
    pub logic: Option<Logic>,
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<FieldQuery>,
}

impl PropertyQuery {
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

    pub fn name(mut self, query: FieldQuery) -> Self {
        self.name.push(query);
        self
    }

    pub fn value(mut self, query: FieldQuery) -> Self {
        self.value.push(query);
        self
    }

    pub fn units(mut self, query: FieldQuery) -> Self {
        self.units.push(query);
        self
    }
}

/// Query against dataset metadata.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetQuery {
    pub logic: Option<Logic>,
    pub weight: Option<f64>,
    pub simple: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updated_at: Vec<Filter>,
}

impl DatasetQuery {
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

    pub fn id(mut self, filter: Filter) -> Self {
        self.id.push(filter);
        self
    }

    pub fn name(mut self, query: FieldQuery) -> Self {
        self.name.push(query);
        self
    }

    pub fn description(mut self, query: FieldQuery) -> Self {
        self.description.push(query);
        self
    }

    pub fn owner(mut self, query: FieldQuery) -> Self {
        self.owner.push(query);
        self
    }

    pub fn email(mut self, query: FieldQuery) -> Self {
        self.email.push(query);
        self
    }

    pub fn updated_at(mut self, filter: Filter) -> Self {
        self.updated_at.push(filter);
        self
    }
}

/// Query against files attached to datasets.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileQuery {
    pub logic: Option<Logic>,
    pub weight: Option<f64>,
    pub simple: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<FieldQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updated_at: Vec<Filter>,
}

impl FileQuery {
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

    pub fn id(mut self, filter: Filter) -> Self {
        self.id.push(filter);
        self
    }

    pub fn name(mut self, query: FieldQuery) -> Self {
        self.name.push(query);
        self
    }

    pub fn updated_at(mut self, filter: Filter) -> Self {
        self.updated_at.push(filter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ChemicalFilter;
    use serde_json::{json, to_value};

    #[test]
    fn test_system_query_shape() {
        let query = PifSystemQuery::new()
            .uid(Filter::new().equal("000496A81BDD616A5BBA1FC4D3B5AC1A"))
            .chemical_formula(
                ChemicalFieldQuery::new().filter(ChemicalFilter::new().equal("C22H15NSSi")),
            );
        assert_eq!(
            to_value(&query).unwrap(),
            json!({
                "uid": [{"equal": "000496A81BDD616A5BBA1FC4D3B5AC1A"}],
                "chemical_formula": [{"filter": [{"equal": "C22H15NSSi"}]}]
            })
        );
    }

    #[test]
    fn test_empty_children_are_absent() {
        // A dataset query with only logic set must not emit empty lists
        // for its unused sub-fields.
        let query = DatasetQuery::new().logic(Logic::Must);
        assert_eq!(to_value(&query).unwrap(), json!({"logic": "MUST"}));
    }

    #[test]
    fn test_round_trip() {
        let query = PifSystemQuery::new()
            .updated_at(Filter::new().max("2017-10-01T00:00:00.000Z"))
            .properties(
                PropertyQuery::new()
                    .name(FieldQuery::new().filter(Filter::new().equal("Band gap")))
                    .value(FieldQuery::new().filter(Filter::new().min(0.0).max(0.5))),
            );
        let parsed: PifSystemQuery =
            serde_json::from_value(to_value(&query).unwrap()).unwrap();
        assert_eq!(parsed, query);
    }
}
