//! Per experiment tracer records assembled from the inputs of each configuration
use serde::{Deserialize, Serialize};

use crate::document::configuration::{Configuration, Input, Label};
use crate::document::fluxml::FluxMl;

/// One labeled tracer fed in an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracerRecord {
    /// Name of the configuration
    pub experiment_id: String,
    pub tracer_id: String,
    /// Id of the pool fed with the tracer
    pub met_id: String,
    /// 1-based labeled atom positions
    pub atom_ids: Vec<usize>,
    /// Mass distribution of a labeled position, `[unlabeled, labeled]`
    pub atom_mdv: Vec<f64>,
    /// Fraction of the input made of this tracer, absent when the label value is an expression
    pub enrichment: Option<f64>,
}

impl TracerRecord {
    /// Build the record of one label, `None` for labels without labeled positions
    pub fn from_label(experiment_id: &str, input: &Input, label: &Label) -> Option<TracerRecord> {
        let atom_ids = label.labeled_positions();
        if atom_ids.is_empty() {
            return None;
        }
        let tracer_id = match &input.id {
            Some(id) => format!("{}#{}", id, label.cfg),
            None => format!("{}#{}", input.pool, label.cfg),
        };
        Some(TracerRecord {
            experiment_id: experiment_id.to_string(),
            tracer_id,
            met_id: input.pool.clone(),
            atom_ids,
            atom_mdv: atom_mdv(label.purity.as_deref()),
            enrichment: label.value.as_ref().and_then(|value| value.as_fraction()),
        })
    }
}

/// Labeled position mass distribution, fully labeled unless a numeric purity says otherwise
fn atom_mdv(purity: Option<&str>) -> Vec<f64> {
    match purity.and_then(|p| p.trim().parse::<f64>().ok()) {
        Some(purity) => vec![1.0 - purity, purity],
        None => vec![0.0, 1.0],
    }
}

/// Tracer records of one configuration, in input then label order
pub fn configuration_tracers(configuration: &Configuration) -> Vec<TracerRecord> {
    configuration
        .inputs
        .iter()
        .flat_map(|input| {
            input
                .labels
                .iter()
                .filter_map(move |label| {
                    TracerRecord::from_label(&configuration.name, input, label)
                })
        })
        .collect()
}

impl FluxMl {
    /// Tracer records of every configuration, in document order
    pub fn tracers(&self) -> Vec<TracerRecord> {
        self.configurations
            .iter()
            .flat_map(configuration_tracers)
            .collect()
    }
}
