//! Parsing of the `simulation` element of a configuration
use roxmltree::Node;

use crate::document::simulation::{
    FluxValue, FluxValueBuilder, PoolSizeValue, PoolSizeValueBuilder, Simulation,
    SimulationBuilder, SimulationVariables,
};
use crate::document::types::{EdWeight, FluxValueType, SimulationMethod, SimulationType};
use crate::io::fluxml_parse::attributes::{child, children, InElement};
use crate::io::fluxml_parse::{FluxmlParseError, FluxmlParser};

impl FluxmlParser<'_> {
    pub(super) fn simulation(&mut self, node: Node) -> Result<Simulation, FluxmlParseError> {
        let simulation_type = self
            .enum_attribute::<SimulationType>(node, "type")?
            .unwrap_or_default();
        let method = self
            .enum_attribute::<SimulationMethod>(node, "method")?
            .unwrap_or_default();
        let model = match child(node, "model") {
            Some(model_node) => Some(self.measurement_model(model_node)?),
            None => None,
        };
        let variables = match child(node, "variables") {
            Some(variables_node) => Some(self.variables(variables_node)?),
            None => None,
        };
        SimulationBuilder::default()
            .simulation_type(simulation_type)
            .method(method)
            .model(model)
            .variables(variables)
            .build()
            .in_element(node)
    }

    fn variables(&mut self, node: Node) -> Result<SimulationVariables, FluxmlParseError> {
        let mut flux_values = Vec::new();
        for value_node in children(node, "fluxvalue") {
            flux_values.push(self.flux_value(value_node)?);
        }
        let mut pool_size_values = Vec::new();
        for value_node in children(node, "poolsizevalue") {
            pool_size_values.push(self.pool_size_value(value_node)?);
        }
        Ok(SimulationVariables {
            flux_values,
            pool_size_values,
        })
    }

    fn flux_value(&mut self, node: Node) -> Result<FluxValue, FluxmlParseError> {
        let mut builder = FluxValueBuilder::default();
        builder.flux(self.required_attribute(node, "flux")?);
        if let Some(flux_type) = self.enum_attribute::<FluxValueType>(node, "type")? {
            builder.flux_type(flux_type);
        }
        if let Some(value) = self.text_value::<f64>(node)? {
            builder.value(value);
        }
        builder
            .lo(self.attribute::<f64>(node, "lo")?)
            .hi(self.attribute::<f64>(node, "hi")?)
            .inc(self.attribute::<f64>(node, "inc")?)
            .edweight(self.edweight(node)?)
            .build()
            .in_element(node)
    }

    fn pool_size_value(&mut self, node: Node) -> Result<PoolSizeValue, FluxmlParseError> {
        let mut builder = PoolSizeValueBuilder::default();
        builder.pool(self.required_attribute(node, "pool")?);
        if let Some(value) = self.text_value::<f64>(node)? {
            builder.value(value);
        }
        builder
            .lo(self.attribute::<f64>(node, "lo")?)
            .hi(self.attribute::<f64>(node, "hi")?)
            .inc(self.attribute::<f64>(node, "inc")?)
            .edweight(self.edweight(node)?)
            .build()
            .in_element(node)
    }

    fn edweight(&mut self, node: Node) -> Result<EdWeight, FluxmlParseError> {
        match self.attribute::<f64>(node, "edweight")? {
            Some(weight) => EdWeight::checked("edweight", weight).in_element(node),
            None => Ok(EdWeight::default()),
        }
    }
}
