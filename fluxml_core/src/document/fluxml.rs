//! This module provides the root records of FluxML documents
use serde::Serialize;

use super::configuration::{Configuration, Input};
use super::constraints::Constraints;
use super::info::Info;
use super::network::ReactionNetwork;
use super::{index_unique, require_min_len, ValidationError};

/// Represents a complete FluxML document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluxMl {
    pub info: Option<Info>,
    pub reaction_network: ReactionNetwork,
    /// Global constraints, apply to every configuration without local constraints
    pub constraints: Option<Constraints>,
    /// Experiments, in document order
    pub configurations: Vec<Configuration>,
}

impl FluxMl {
    /// Assemble a document, rejecting configurations sharing a name
    pub fn new(
        info: Option<Info>,
        reaction_network: ReactionNetwork,
        constraints: Option<Constraints>,
        configurations: Vec<Configuration>,
    ) -> Result<FluxMl, ValidationError> {
        // Only checks uniqueness, the order of `configurations` is kept as is
        index_unique("configurations", configurations.iter().collect(), |c| {
            c.name.as_str()
        })?;
        Ok(FluxMl {
            info,
            reaction_network,
            constraints,
            configurations,
        })
    }

    /// Look up a configuration by name
    pub fn configuration(&self, name: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Constraints in force for the configuration called `name`
    pub fn constraints_for(&self, name: &str) -> Option<&Constraints> {
        self.configuration(name)?
            .effective_constraints(self.constraints.as_ref())
    }
}

/// Represents a substrate mixture document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mixture {
    /// Inputs making up the mixture, at least one
    pub inputs: Vec<Input>,
    /// Objective value associated with the mixture (e.g. cost)
    pub objvalue: Option<f64>,
}

impl Mixture {
    pub fn new(inputs: Vec<Input>, objvalue: Option<f64>) -> Result<Mixture, ValidationError> {
        require_min_len("inputs", &inputs, 1)?;
        Ok(Mixture { inputs, objvalue })
    }
}

/// Either kind of document root
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Document {
    FluxMl(FluxMl),
    Mixture(Mixture),
}

impl Document {
    pub fn as_fluxml(&self) -> Option<&FluxMl> {
        match self {
            Document::FluxMl(doc) => Some(doc),
            Document::Mixture(_) => None,
        }
    }

    pub fn as_mixture(&self) -> Option<&Mixture> {
        match self {
            Document::FluxMl(_) => None,
            Document::Mixture(mixture) => Some(mixture),
        }
    }
}
