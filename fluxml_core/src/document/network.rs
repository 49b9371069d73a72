//! This module provides the records describing the metabolic network: pools, reactions and the
//! atom mappings of their reactants and products
use derive_builder::Builder;
use indexmap::IndexMap;
use serde::Serialize;

use super::types::Atoms;
use super::{index_unique, require_min_len, ValidationError};

/// Free form name/value annotation on a pool or reaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Kind of annotation, e.g. `KEGGID`
    pub name: String,
    /// Content of the annotation
    pub value: String,
}

/// Look up the value of the first annotation called `name`
pub(crate) fn annotation_value<'a>(annotations: &'a [Annotation], name: &str) -> Option<&'a str> {
    annotations
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_str())
}

// region Pools
/// Represents a metabolite pool
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(validate = "Self::validate", error = "ValidationError"))]
pub struct Pool {
    /// Used to identify the pool (must be unique)
    #[builder(setter(into))]
    pub id: String,
    /// Number of labelable atom positions
    #[builder(default = "Atoms::default()")]
    pub atoms: Atoms,
    /// Pool size, must not be negative
    #[builder(default = "1.0")]
    pub size: f64,
    /// Atom configuration of the pool
    #[builder(default = "String::from(\"0\")", setter(into))]
    pub cfg: String,
    /// Pool annotations
    #[builder(default = "Vec::new()")]
    pub annotations: Vec<Annotation>,
}

impl PoolBuilder {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(size) = self.size {
            // Written this way so that NaN is rejected as well
            if !(size >= 0.0) {
                return Err(ValidationError::Negative {
                    field: "size",
                    value: size,
                });
            }
        }
        Ok(())
    }
}

/// Collection of the pools of a network, keyed by pool id in document order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetabolitePools {
    pub pools: IndexMap<String, Pool>,
}

impl MetabolitePools {
    /// Smallest number of pools a network can have
    pub const MIN_POOLS: usize = 2;

    /// Create the collection, rejecting fewer than [`Self::MIN_POOLS`] pools or duplicate ids
    pub fn new(pools: Vec<Pool>) -> Result<MetabolitePools, ValidationError> {
        require_min_len("pools", &pools, Self::MIN_POOLS)?;
        let pools = index_unique("pools", pools, |p| p.id.as_str())?;
        Ok(MetabolitePools { pools })
    }

    pub fn get(&self, id: &str) -> Option<&Pool> {
        self.pools.get(id)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Iterate over the pools in document order
    pub fn iter(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }
}
// endregion Pools

// region Reactions
/// Alternative atom mapping of a reactant or product
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct Variant {
    /// Atom mapping of this variant
    #[builder(setter(into))]
    pub cfg: String,
    /// Relative probability of this variant
    #[builder(default = "None")]
    pub ratio: Option<f64>,
}

/// Common view of reducts and rproducts, both of which reference a pool
pub trait PoolReference {
    /// Id of the referenced pool
    fn pool_id(&self) -> &str;
    /// Default atom mapping
    fn cfg(&self) -> Option<&str>;
    /// Alternative atom mappings
    fn variants(&self) -> &[Variant];

    /// Atom mapping in force for this reference
    ///
    /// # Note:
    /// Variants supersede the default cfg, in which case the first variant is used.
    fn effective_cfg(&self) -> Option<&str> {
        match self.variants().first() {
            Some(variant) => Some(variant.cfg.as_str()),
            None => self.cfg(),
        }
    }
}

/// Represents a reactant (educt) of a reaction
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct Reduct {
    /// Id of the pool consumed by the reaction
    #[builder(setter(into))]
    pub pool_id: String,
    /// Default atom mapping
    #[builder(default = "None")]
    pub cfg: Option<String>,
    /// Alternative atom mappings
    #[builder(default = "Vec::new()")]
    pub variants: Vec<Variant>,
}

impl PoolReference for Reduct {
    fn pool_id(&self) -> &str {
        &self.pool_id
    }

    fn cfg(&self) -> Option<&str> {
        self.cfg.as_deref()
    }

    fn variants(&self) -> &[Variant] {
        &self.variants
    }
}

/// Represents a product of a reaction
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct RProduct {
    /// Id of the pool produced by the reaction
    #[builder(setter(into))]
    pub pool_id: String,
    /// Default atom mapping
    #[builder(default = "None")]
    pub cfg: Option<String>,
    /// Alternative atom mappings
    #[builder(default = "Vec::new()")]
    pub variants: Vec<Variant>,
}

impl PoolReference for RProduct {
    fn pool_id(&self) -> &str {
        &self.pool_id
    }

    fn cfg(&self) -> Option<&str> {
        self.cfg.as_deref()
    }

    fn variants(&self) -> &[Variant] {
        &self.variants
    }
}

/// Represents a reaction in the network
///
/// # Note:
/// Reactions without reducts or rproducts (sources and sinks) are allowed.
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct Reaction {
    /// Used to identify the reaction (must be unique)
    #[builder(setter(into))]
    pub id: String,
    /// Whether the reaction is reversible
    #[builder(default = "true")]
    pub bidirectional: bool,
    /// Reaction annotations
    #[builder(default = "Vec::new()")]
    pub annotations: Vec<Annotation>,
    /// Reactants, in document order
    #[builder(default = "Vec::new()")]
    pub reducts: Vec<Reduct>,
    /// Products, in document order
    #[builder(default = "Vec::new()")]
    pub rproducts: Vec<RProduct>,
}

/// The metabolic network: pools plus the reactions connecting them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionNetwork {
    pub metabolite_pools: MetabolitePools,
    /// Map of reaction ids to reactions, in document order
    pub reactions: IndexMap<String, Reaction>,
}

impl ReactionNetwork {
    /// Create a new network, rejecting an empty reaction list or duplicate reaction ids
    pub fn new(
        metabolite_pools: MetabolitePools,
        reactions: Vec<Reaction>,
    ) -> Result<ReactionNetwork, ValidationError> {
        require_min_len("reactions", &reactions, 1)?;
        let reactions = index_unique("reactions", reactions, |r| r.id.as_str())?;
        Ok(ReactionNetwork {
            metabolite_pools,
            reactions,
        })
    }

    pub fn pool(&self, id: &str) -> Option<&Pool> {
        self.metabolite_pools.get(id)
    }

    pub fn reaction(&self, id: &str) -> Option<&Reaction> {
        self.reactions.get(id)
    }
}
// endregion Reactions
