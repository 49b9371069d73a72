//! Optional reference check run after a document has been built.
//!
//! The parser doesn't check that ids used as references resolve, this pass does and reports every
//! dangling reference instead of stopping at the first one.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use super::fluxml::FluxMl;
use super::network::PoolReference;

/// What kind of reference could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    /// Reduct naming an unknown pool
    ReductPool,
    /// RProduct naming an unknown pool
    RProductPool,
    /// Input feeding an unknown pool
    InputPool,
    /// Pool size value for an unknown pool
    PoolSizeValuePool,
    /// Datum without a measurement model entry with the same id
    DatumModelEntry,
}

impl Display for ReferenceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ReferenceKind::ReductPool => "reduct pool",
            ReferenceKind::RProductPool => "rproduct pool",
            ReferenceKind::InputPool => "input pool",
            ReferenceKind::PoolSizeValuePool => "poolsizevalue pool",
            ReferenceKind::DatumModelEntry => "datum measurement",
        };
        write!(f, "{}", text)
    }
}

/// A reference to an id that doesn't exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub kind: ReferenceKind,
    /// The id that could not be found
    pub id: String,
    /// Where the reference was found, e.g. `reaction v1` or `configuration c1`
    pub context: String,
}

impl Display for DanglingReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?} in {} does not exist", self.kind, self.id, self.context)
    }
}

/// Every dangling reference found in a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub dangling: Vec<DanglingReference>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }

    fn push(&mut self, kind: ReferenceKind, id: &str, context: String) {
        self.dangling.push(DanglingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

impl Display for IntegrityReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.dangling.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", lines.join("; "))
    }
}

/// Check that every pool and measurement reference of `doc` resolves
///
/// # Examples
/// ```rust
/// use fluxml_core::document::integrity::check_references;
/// use fluxml_core::parse_fluxml;
/// let xml = r#"<fluxml>
///   <reactionnetwork>
///     <metabolitepools><pool id="A" atoms="1"/><pool id="B" atoms="1"/></metabolitepools>
///     <reaction id="v1"><reduct id="A" cfg="a"/><rproduct id="C" cfg="a"/></reaction>
///   </reactionnetwork>
/// </fluxml>"#;
/// let doc = parse_fluxml(xml).unwrap().document;
/// let report = check_references(&doc);
/// assert_eq!(report.dangling.len(), 1);
/// assert_eq!(report.dangling[0].id, "C");
/// ```
pub fn check_references(doc: &FluxMl) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    let pools = &doc.reaction_network.metabolite_pools;

    for reaction in doc.reaction_network.reactions.values() {
        for reduct in &reaction.reducts {
            if pools.get(reduct.pool_id()).is_none() {
                report.push(
                    ReferenceKind::ReductPool,
                    reduct.pool_id(),
                    format!("reaction {}", reaction.id),
                );
            }
        }
        for rproduct in &reaction.rproducts {
            if pools.get(rproduct.pool_id()).is_none() {
                report.push(
                    ReferenceKind::RProductPool,
                    rproduct.pool_id(),
                    format!("reaction {}", reaction.id),
                );
            }
        }
    }

    for configuration in &doc.configurations {
        let context = format!("configuration {}", configuration.name);
        for input in &configuration.inputs {
            if pools.get(&input.pool).is_none() {
                report.push(ReferenceKind::InputPool, &input.pool, context.clone());
            }
        }
        if let Some(measurement) = &configuration.measurement {
            let model_ids: HashSet<&str> = measurement.model.ids().into_iter().collect();
            for datum in &measurement.data.data {
                if !model_ids.contains(datum.id.as_str()) {
                    report.push(ReferenceKind::DatumModelEntry, &datum.id, context.clone());
                }
            }
        }
        let variables = configuration
            .simulation
            .as_ref()
            .and_then(|s| s.variables.as_ref());
        if let Some(variables) = variables {
            for value in &variables.pool_size_values {
                if pools.get(&value.pool).is_none() {
                    report.push(ReferenceKind::PoolSizeValuePool, &value.pool, context.clone());
                }
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::configuration::{ConfigurationBuilder, InputBuilder};
    use crate::document::measurement::{
        DatumBuilder, GroupBuilder, LabelingMeasurement, Measurement, MeasurementData,
        MeasurementModel,
    };
    use crate::document::network::{
        MetabolitePools, PoolBuilder, RProductBuilder, ReactionBuilder, ReactionNetwork,
        ReductBuilder,
    };
    use crate::document::simulation::{PoolSizeValueBuilder, SimulationBuilder, SimulationVariables};

    fn doc(reduct_pool: &str, input_pool: &str, datum_id: &str) -> FluxMl {
        let pools = MetabolitePools::new(vec![
            PoolBuilder::default().id("A").build().unwrap(),
            PoolBuilder::default().id("B").build().unwrap(),
        ])
        .unwrap();
        let reaction = ReactionBuilder::default()
            .id("v1")
            .reducts(vec![ReductBuilder::default()
                .pool_id(reduct_pool)
                .build()
                .unwrap()])
            .rproducts(vec![RProductBuilder::default().pool_id("B").build().unwrap()])
            .build()
            .unwrap();
        let network = ReactionNetwork::new(pools, vec![reaction]).unwrap();
        let measurement = Measurement {
            mlabel: None,
            model: MeasurementModel {
                labeling_measurement: Some(LabelingMeasurement {
                    groups: vec![GroupBuilder::default().id("ms_B").build().unwrap()],
                }),
                ..Default::default()
            },
            data: MeasurementData {
                dlabel: None,
                data: vec![DatumBuilder::default()
                    .id(datum_id)
                    .value(0.5)
                    .stddev(0.01)
                    .build()
                    .unwrap()],
            },
        };
        let configuration = ConfigurationBuilder::default()
            .name("c1")
            .inputs(vec![InputBuilder::default().pool(input_pool).build().unwrap()])
            .measurement(Some(measurement))
            .build()
            .unwrap();
        FluxMl::new(None, network, None, vec![configuration]).unwrap()
    }

    #[test]
    fn clean_document() {
        let report = check_references(&doc("A", "A", "ms_B"));
        assert!(report.is_clean());
    }

    #[test]
    fn reports_every_dangling_reference() {
        let report = check_references(&doc("X", "Y", "ms_Z"));
        let kinds: Vec<ReferenceKind> = report.dangling.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ReferenceKind::ReductPool,
                ReferenceKind::InputPool,
                ReferenceKind::DatumModelEntry
            ]
        );
        assert_eq!(report.dangling[0].context, "reaction v1");
        assert_eq!(report.dangling[2].id, "ms_Z");
        assert_eq!(
            report.dangling[1].to_string(),
            "input pool \"Y\" in configuration c1 does not exist"
        );
    }

    #[test]
    fn reports_products_and_pool_size_values() {
        let mut doc = doc("A", "A", "ms_B");
        doc.reaction_network
            .reactions
            .get_mut("v1")
            .unwrap()
            .rproducts
            .push(RProductBuilder::default().pool_id("Z").build().unwrap());
        let variables = SimulationVariables {
            flux_values: Vec::new(),
            pool_size_values: vec![
                PoolSizeValueBuilder::default()
                    .pool("B")
                    .value(1.0)
                    .build()
                    .unwrap(),
                PoolSizeValueBuilder::default()
                    .pool("Q")
                    .value(0.5)
                    .build()
                    .unwrap(),
            ],
        };
        doc.configurations[0].simulation = Some(
            SimulationBuilder::default()
                .variables(Some(variables))
                .build()
                .unwrap(),
        );

        let report = check_references(&doc);
        assert_eq!(report.dangling.len(), 2);
        assert_eq!(report.dangling[0].kind, ReferenceKind::RProductPool);
        assert_eq!(report.dangling[0].id, "Z");
        assert_eq!(report.dangling[0].context, "reaction v1");
        assert_eq!(report.dangling[1].kind, ReferenceKind::PoolSizeValuePool);
        assert_eq!(report.dangling[1].id, "Q");
        assert_eq!(
            report.to_string(),
            "rproduct pool \"Z\" in reaction v1 does not exist; \
             poolsizevalue pool \"Q\" in configuration c1 does not exist"
        );
    }
}
