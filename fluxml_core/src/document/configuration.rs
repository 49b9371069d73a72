//! This module provides the Configuration record, one labeling experiment, along with the
//! labeled substrate inputs fed into it
use derive_builder::Builder;
use serde::Serialize;

use super::constraints::Constraints;
use super::measurement::Measurement;
use super::simulation::Simulation;
use super::types::{InputType, MathExpression};
use super::{require_min_len, ValidationError};

/// Fragmentation separator of an EMU label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sep;

/// Value of a label: a plain fraction, or an expression to be evaluated later
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LabelValue {
    Fraction(f64),
    Expression(MathExpression),
}

impl LabelValue {
    /// Get the fraction, if the value is numeric
    pub fn as_fraction(&self) -> Option<f64> {
        match self {
            LabelValue::Fraction(value) => Some(*value),
            LabelValue::Expression(_) => None,
        }
    }
}

/// One labeling state of an input substrate
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct Label {
    /// Labeling pattern, `1` for labeled positions, `0` for unlabeled, `x` for either
    #[builder(setter(into))]
    pub cfg: String,
    #[builder(default = "None")]
    pub purity: Option<String>,
    #[builder(default = "None")]
    pub cost: Option<f64>,
    #[builder(default = "None")]
    pub value: Option<LabelValue>,
    /// `None` when the label has no separators
    #[builder(default = "None")]
    pub separators: Option<Vec<Sep>>,
}

impl Label {
    /// 1-based atom positions marked as labeled in the cfg
    pub fn labeled_positions(&self) -> Vec<usize> {
        self.cfg
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == '1')
            .map(|(i, _)| i + 1)
            .collect()
    }
}

/// A labeled substrate fed into the network
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct Input {
    /// Id of the pool being fed
    #[builder(setter(into))]
    pub pool: String,
    #[builder(default = "InputType::Isotopomer")]
    pub input_type: InputType,
    /// Time profile of the feed
    #[builder(default = "None")]
    pub profile: Option<String>,
    /// Id of the input inside a mixture
    #[builder(default = "None")]
    pub id: Option<String>,
    #[builder(default = "Vec::new()")]
    pub labels: Vec<Label>,
}

/// One experimental setup or simulation scenario
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(validate = "Self::validate", error = "ValidationError"))]
pub struct Configuration {
    /// Used to identify the configuration (must be unique within the document)
    #[builder(setter(into))]
    pub name: String,
    /// Whether the system is at isotopic steady state
    #[builder(default = "true")]
    pub stationary: bool,
    #[builder(default = "None")]
    pub time: Option<f64>,
    #[builder(default = "None")]
    pub comment: Option<String>,
    /// Substrate inputs, at least one
    pub inputs: Vec<Input>,
    /// Local constraints, override the global ones
    #[builder(default = "None")]
    pub constraints: Option<Constraints>,
    #[builder(default = "None")]
    pub measurement: Option<Measurement>,
    #[builder(default = "None")]
    pub simulation: Option<Simulation>,
}

impl ConfigurationBuilder {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(inputs) = &self.inputs {
            require_min_len("inputs", inputs, 1)?;
        }
        Ok(())
    }
}

impl Configuration {
    /// Constraints in force for this configuration: the local ones if present, else `global`
    pub fn effective_constraints<'a>(
        &'a self,
        global: Option<&'a Constraints>,
    ) -> Option<&'a Constraints> {
        self.constraints.as_ref().or(global)
    }
}
