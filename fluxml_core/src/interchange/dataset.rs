//! Fluxomics dataset, the reaction network wrapped with metadata
use serde::{Deserialize, Serialize};

use crate::document::fluxml::FluxMl;
use crate::interchange::reaction_network::ReactionNetwork;

/// Version of the data model written into new datasets
pub const FLUXOMICS_DATA_MODEL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluxomicsDatasetMetadata {
    pub fluxomics_data_model_version: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluxomicsDataset {
    pub metadata: FluxomicsDatasetMetadata,
    pub reaction_network: ReactionNetwork,
}

impl FluxomicsDataset {
    pub fn new(description: impl Into<String>, reaction_network: ReactionNetwork) -> Self {
        FluxomicsDataset {
            metadata: FluxomicsDatasetMetadata {
                fluxomics_data_model_version: FLUXOMICS_DATA_MODEL_VERSION.to_string(),
                description: description.into(),
            },
            reaction_network,
        }
    }
}

impl From<&FluxMl> for FluxomicsDataset {
    /// The description is taken from the document info (comment, else name), empty if neither
    /// is set
    fn from(doc: &FluxMl) -> Self {
        let description = doc
            .info
            .as_ref()
            .and_then(|info| info.comment.clone().or_else(|| info.name.clone()))
            .unwrap_or_default();
        FluxomicsDataset::new(description, ReactionNetwork::from(&doc.reaction_network))
    }
}
