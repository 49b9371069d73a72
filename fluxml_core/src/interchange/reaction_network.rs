//! Flat reaction network: species, and reactions listing substrates and products together
use serde::{Deserialize, Serialize};

use crate::document::network::{
    annotation_value, Pool, PoolReference, Reaction as FluxmlReaction,
    ReactionNetwork as FluxmlReactionNetwork,
};

/// A labelable species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub n_labellable_atom: u32,
}

/// A substrate or product taking part in a reaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactant {
    /// Id of the species
    pub id: String,
    pub is_product: bool,
    /// Atom mapping of the species in this reaction
    pub atom_pattern: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Reactant {
    pub fn is_substrate(&self) -> bool {
        !self.is_product
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: String,
    pub bidirectional: bool,
    /// Substrates followed by products
    pub reactants: Vec<Reactant>,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Reaction {
    pub fn substrates(&self) -> impl Iterator<Item = &Reactant> {
        self.reactants.iter().filter(|r| r.is_substrate())
    }

    pub fn products(&self) -> impl Iterator<Item = &Reactant> {
        self.reactants.iter().filter(|r| r.is_product)
    }
}

/// The reactions of a metabolic network along with its species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionNetwork {
    pub reactions: Vec<Reaction>,
    pub species: Vec<Species>,
}

impl From<&Pool> for Species {
    fn from(pool: &Pool) -> Self {
        Species {
            id: pool.id.clone(),
            name: annotation_value(&pool.annotations, "name").map(String::from),
            n_labellable_atom: u32::from(pool.atoms.get()),
        }
    }
}

impl From<&FluxmlReactionNetwork> for ReactionNetwork {
    /// Convert one to one: every pool becomes a species and every reaction keeps its reducts
    /// and rproducts, in document order.
    ///
    /// Names come from `name` annotations, reactions without one are named by their id.
    fn from(network: &FluxmlReactionNetwork) -> Self {
        let species = network.metabolite_pools.iter().map(Species::from).collect();
        let reactions = network
            .reactions
            .values()
            .map(|reaction| flat_reaction(network, reaction))
            .collect();
        ReactionNetwork { reactions, species }
    }
}

fn flat_reaction(network: &FluxmlReactionNetwork, reaction: &FluxmlReaction) -> Reaction {
    let substrates = reaction
        .reducts
        .iter()
        .map(|reduct| reactant(network, reduct, false));
    let products = reaction
        .rproducts
        .iter()
        .map(|rproduct| reactant(network, rproduct, true));
    Reaction {
        id: reaction.id.clone(),
        bidirectional: reaction.bidirectional,
        reactants: substrates.chain(products).collect(),
        name: annotation_value(&reaction.annotations, "name")
            .unwrap_or(reaction.id.as_str())
            .to_string(),
        comment: annotation_value(&reaction.annotations, "comment").map(String::from),
    }
}

fn reactant<R: PoolReference>(
    network: &FluxmlReactionNetwork,
    reference: &R,
    is_product: bool,
) -> Reactant {
    Reactant {
        id: reference.pool_id().to_string(),
        is_product,
        atom_pattern: reference.effective_cfg().unwrap_or_default().to_string(),
        name: network
            .pool(reference.pool_id())
            .and_then(|pool| annotation_value(&pool.annotations, "name"))
            .map(String::from),
    }
}
