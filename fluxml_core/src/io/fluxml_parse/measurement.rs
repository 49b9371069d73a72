//! Parsing of the `measurement` element: the measurement model, the measured data and their
//! metadata
use roxmltree::Node;

use crate::document::measurement::{
    DLabel, Datum, DatumBuilder, ErrorModel, FluxMeasurement, FluxRatios, Group, GroupBuilder,
    LabelingMeasurement, MLabel, Measurement, MeasurementData, MeasurementModel, NetFlux,
    NetRatio, PoolSize, PoolSizeMeasurement, PoolSizeRatio, PoolSizeRatios, Procedure, XchFlux,
    XchRatio,
};
use crate::document::types::{Atoms, ComposedWeight, DatumType, GroupScale, MathExpression, Row};
use crate::io::fluxml_parse::attributes::{child, child_text, children, element_text, InElement};
use crate::io::fluxml_parse::{required_child, FluxmlParseError, FluxmlParser};

impl FluxmlParser<'_> {
    pub(super) fn measurement(&mut self, node: Node) -> Result<Measurement, FluxmlParseError> {
        let mlabel = child(node, "mlabel").map(|mlabel_node| self.mlabel(mlabel_node));
        let model = self.measurement_model(required_child(node, "model")?)?;
        let data = self.measurement_data(required_child(node, "data")?)?;
        log::trace!(
            "Parsed measurement with {} model entries and {} data points",
            model.ids().len(),
            data.data.len()
        );
        Ok(Measurement {
            mlabel,
            model,
            data,
        })
    }

    fn mlabel(&mut self, node: Node) -> MLabel {
        MLabel {
            date: self.datetime(node, "date"),
            version: child_text(node, "version"),
            comment: child_text(node, "comment"),
            fluxunit: child_text(node, "fluxunit"),
            poolsizeunit: child_text(node, "poolsizeunit"),
            timeunit: child_text(node, "timeunit"),
        }
    }

    // region Model
    /// Also used for the model of a simulation
    pub(super) fn measurement_model(
        &mut self,
        node: Node,
    ) -> Result<MeasurementModel, FluxmlParseError> {
        let labeling_measurement = match child(node, "labelingmeasurement") {
            Some(labeling_node) => Some(self.labeling_measurement(labeling_node)?),
            None => None,
        };
        let flux_measurement = match child(node, "fluxmeasurement") {
            Some(flux_node) => Some(self.flux_measurement(flux_node)?),
            None => None,
        };
        let pool_size_measurement = match child(node, "poolsizemeasurement") {
            Some(size_node) => Some(PoolSizeMeasurement {
                pool_sizes: self.definitions(size_node, "poolsize", |id, error_model, content| {
                    PoolSize {
                        id,
                        error_model,
                        content,
                    }
                })?,
            }),
            None => None,
        };
        let flux_ratios = match child(node, "fluxratios") {
            Some(ratios_node) => Some(FluxRatios {
                net_ratios: self.definitions(ratios_node, "netratio", |id, _, content| NetRatio {
                    id,
                    content,
                })?,
                xch_ratios: self.definitions(ratios_node, "xchratio", |id, _, content| XchRatio {
                    id,
                    content,
                })?,
            }),
            None => None,
        };
        let pool_size_ratios = match child(node, "poolsizeratios") {
            Some(ratios_node) => Some(PoolSizeRatios {
                pool_size_ratios: self.definitions(
                    ratios_node,
                    "poolsizeratio",
                    |id, _, content| PoolSizeRatio { id, content },
                )?,
            }),
            None => None,
        };
        Ok(MeasurementModel {
            labeling_measurement,
            flux_measurement,
            pool_size_measurement,
            flux_ratios,
            pool_size_ratios,
        })
    }

    fn labeling_measurement(
        &mut self,
        node: Node,
    ) -> Result<LabelingMeasurement, FluxmlParseError> {
        let mut groups = Vec::new();
        for group_node in children(node, "group") {
            groups.push(self.group(group_node)?);
        }
        Ok(LabelingMeasurement { groups })
    }

    fn group(&mut self, node: Node) -> Result<Group, FluxmlParseError> {
        let id = self.required_attribute(node, "id")?;
        let scale = self
            .enum_attribute::<GroupScale>(node, "scale")?
            .unwrap_or_default();
        GroupBuilder::default()
            .id(id)
            .times(self.attribute::<String>(node, "times")?)
            .scale(scale)
            .error_model(self.error_model(node))
            .content(self.math_content(node))
            .build()
            .in_element(node)
    }

    fn error_model(&mut self, node: Node) -> Option<ErrorModel> {
        child(node, "errormodel").map(|error_node| ErrorModel {
            content: self.math_content(error_node),
        })
    }

    fn flux_measurement(&mut self, node: Node) -> Result<FluxMeasurement, FluxmlParseError> {
        Ok(FluxMeasurement {
            net_fluxes: self.definitions(node, "netflux", |id, error_model, content| NetFlux {
                id,
                error_model,
                content,
            })?,
            xch_fluxes: self.definitions(node, "xchflux", |id, error_model, content| XchFlux {
                id,
                error_model,
                content,
            })?,
        })
    }

    /// Parse the children called `name` sharing the `id` + error model + content layout
    fn definitions<T, F>(
        &mut self,
        node: Node,
        name: &str,
        make: F,
    ) -> Result<Vec<T>, FluxmlParseError>
    where
        F: Fn(String, Option<ErrorModel>, Option<MathExpression>) -> T,
    {
        let mut definitions = Vec::new();
        for definition_node in children(node, name) {
            let id = self.required_attribute(definition_node, "id")?;
            let error_model = self.error_model(definition_node);
            let content = self.math_content(definition_node);
            definitions.push(make(id, error_model, content));
        }
        Ok(definitions)
    }
    // endregion Model

    // region Data
    fn measurement_data(&mut self, node: Node) -> Result<MeasurementData, FluxmlParseError> {
        let dlabel = match child(node, "dlabel") {
            Some(dlabel_node) => Some(self.dlabel(dlabel_node)?),
            None => None,
        };
        let mut data = Vec::new();
        for datum_node in children(node, "datum") {
            data.push(self.datum(datum_node)?);
        }
        Ok(MeasurementData { dlabel, data })
    }

    fn dlabel(&mut self, node: Node) -> Result<DLabel, FluxmlParseError> {
        Ok(DLabel {
            strain: child_text(node, "strain"),
            date: self.datetime(node, "date"),
            start: self.datetime(node, "start"),
            finish: self.datetime(node, "finish"),
            experiment: self.procedure(node, "experiment")?,
            analytics: self.procedure(node, "analytics")?,
            analysis: self.procedure(node, "analysis")?,
            comment: child_text(node, "comment"),
        })
    }

    /// `<experiment operator="...">description</experiment>` and its siblings
    fn procedure(&mut self, node: Node, name: &str) -> Result<Option<Procedure>, FluxmlParseError> {
        match child(node, name) {
            Some(procedure_node) => Ok(Some(Procedure {
                operator: self.required_attribute(procedure_node, "operator")?,
                description: element_text(procedure_node).unwrap_or_default(),
            })),
            None => Ok(None),
        }
    }

    fn datum(&mut self, node: Node) -> Result<Datum, FluxmlParseError> {
        let mut builder = DatumBuilder::default();
        builder.id(self.required_attribute(node, "id")?);
        // Unset value or stddev fail the build below as missing fields
        if let Some(value) = self.text_value::<f64>(node)? {
            builder.value(value);
        }
        if let Some(stddev) = self.attribute::<f64>(node, "stddev")? {
            builder.stddev(stddev);
        }
        let row = match self.attribute::<i64>(node, "row")? {
            Some(row) => Some(Row::checked("row", row).in_element(node)?),
            None => None,
        };
        let pos = match self.attribute::<i64>(node, "pos")? {
            Some(pos) => Some(Atoms::checked("pos", pos).in_element(node)?),
            None => None,
        };
        builder
            .row(row)
            .time(self.attribute::<f64>(node, "time")?)
            .weight(self.attribute::<String>(node, "weight")?.map(ComposedWeight::new))
            .pos(pos)
            .datum_type(self.enum_attribute::<DatumType>(node, "type")?)
            .build()
            .in_element(node)
    }
    // endregion Data
}
