//! Value objects for experimental-design runs.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::json;

use crate::types::RunUid;

/// Optimization target of a design run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    #[serde(rename = "descriptor")]
    pub name: String,
    pub objective: String,
}

impl Target {
    /// Maximize the named output column.
    pub fn maximize(name: impl Into<String>) -> Self {
        Target {
            name: name.into(),
            objective: "Max".to_string(),
        }
    }

    /// Minimize the named output column.
    pub fn minimize(name: impl Into<String>) -> Self {
        Target {
            name: name.into(),
            objective: "Min".to_string(),
        }
    }

    /// Drive the named output column toward a set point.
    pub fn set_point(name: impl Into<String>, value: f64) -> Self {
        Target {
            name: name.into(),
            objective: value.to_string(),
        }
    }
}

/// Role of an element set in an [Constraint::ElementalInclusion] constraint.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementLogic {
    Must,
    Should,
    Exclude,
}

/// Constraint on candidate generation during a design run.
///
/// Serializes to the `{"name": ..., "type": ..., "options": {...}}`
/// documents the design endpoint expects.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    /// Pin an input column to an exact value.
    RealValue { name: String, value: f64 },
    /// Bound an input column; either bound may be open.
    RealRange {
        name: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Restrict a categorical column to the given categories.
    Categorical {
        name: String,
        accepted_categories: Vec<String>,
    },
    /// Require, prefer, or forbid elements in the candidate formula.
    ElementalInclusion {
        name: String,
        elements: Vec<String>,
        logic: ElementLogic,
    },
    /// Bound the atomic percentage of one element.
    ElementalComposition {
        name: String,
        element: String,
        min: f64,
        max: f64,
    },
}

impl Constraint {
    fn type_name(&self) -> &'static str {
        match self {
            Constraint::RealValue { .. } => "real/value",
            Constraint::RealRange { .. } => "real/range",
            Constraint::Categorical { .. } => "categorical",
            Constraint::ElementalInclusion { .. } => "elemental/inclusion",
            Constraint::ElementalComposition { .. } => "elemental/composition",
        }
    }

    fn name(&self) -> &str {
        match self {
            Constraint::RealValue { name, .. }
            | Constraint::RealRange { name, .. }
            | Constraint::Categorical { name, .. }
            | Constraint::ElementalInclusion { name, .. }
            | Constraint::ElementalComposition { name, .. } => name,
        }
    }

    fn options(&self) -> serde_json::Value {
        match self {
            Constraint::RealValue { value, .. } => json!({ "value": value }),
            Constraint::RealRange { min, max, .. } => {
                let mut options = serde_json::Map::new();
                if let Some(min) = min {
                    options.insert("min".to_string(), json!(min));
                }
                if let Some(max) = max {
                    options.insert("max".to_string(), json!(max));
                }
                serde_json::Value::Object(options)
            }
            Constraint::Categorical {
                accepted_categories,
                ..
            } => json!({ "categories": accepted_categories }),
            Constraint::ElementalInclusion {
                elements, logic, ..
            } => json!({ "elements": elements, "logic": logic }),
            Constraint::ElementalComposition {
                element, min, max, ..
            } => json!({ "element": element, "min": min, "max": max }),
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", self.name())?;
        map.serialize_entry("type", self.type_name())?;
        map.serialize_entry("options", &self.options())?;
        map.end()
    }
}

/// Candidate sampling strategy for a design run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Sampler {
    #[default]
    #[serde(rename = "Default")]
    Default,
    #[serde(rename = "This view")]
    ThisView,
}

/// Everything needed to submit a design run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DesignRunInput {
    pub num_candidates: u32,
    pub effort: u8,
    pub target: Option<Target>,
    pub constraints: Vec<Constraint>,
    pub sampler: Sampler,
}

impl DesignRunInput {
    pub fn new(num_candidates: u32, effort: u8) -> Self {
        DesignRunInput {
            num_candidates,
            effort,
            target: None,
            constraints: Vec::new(),
            sampler: Sampler::default(),
        }
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }
}

/// A submitted design run, tracked server-side by UID.
#[derive(Clone, Debug, Deserialize)]
pub struct DesignRun {
    pub uid: RunUid,
}

/// Progress of an in-flight or completed server-side run.
#[derive(Clone, Debug, Deserialize)]
pub struct ProcessStatus {
    pub uid: Option<RunUid>,
    pub status: Option<String>,
    pub progress: Option<f64>,
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub messages: Vec<String>,
}

impl ProcessStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self.status.as_deref(), Some("Finished"))
    }

    pub fn is_killed(&self) -> bool {
        matches!(self.status.as_deref(), Some("Killed"))
    }
}

/// Candidate lists produced by a completed design run.
#[derive(Clone, Debug, Deserialize)]
pub struct DesignResults {
    #[serde(default, rename = "best_material_results")]
    pub best_materials: Vec<serde_json::Value>,
    #[serde(default, rename = "next_experiment_results")]
    pub next_experiments: Vec<serde_json::Value>,
}
