//! This module provides the simulation settings of a configuration and the simulation variables
//! (free fluxes and pool sizes with their bounds)
use derive_builder::Builder;
use serde::Serialize;

use super::measurement::MeasurementModel;
use super::types::{EdWeight, FluxValueType, SimulationMethod, SimulationType};
use super::ValidationError;

/// Value of a flux, with optional bounds
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct FluxValue {
    /// Id of the flux (usually a reaction id)
    #[builder(setter(into))]
    pub flux: String,
    pub flux_type: FluxValueType,
    pub value: f64,
    #[builder(default = "None")]
    pub lo: Option<f64>,
    #[builder(default = "None")]
    pub hi: Option<f64>,
    /// Increment used when exploring the value
    #[builder(default = "None")]
    pub inc: Option<f64>,
    /// Weight used in experimental design
    #[builder(default = "EdWeight::default()")]
    pub edweight: EdWeight,
}

/// Value of a pool size, with optional bounds
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct PoolSizeValue {
    /// Id of the pool
    #[builder(setter(into))]
    pub pool: String,
    pub value: f64,
    #[builder(default = "None")]
    pub lo: Option<f64>,
    #[builder(default = "None")]
    pub hi: Option<f64>,
    #[builder(default = "None")]
    pub inc: Option<f64>,
    #[builder(default = "EdWeight::default()")]
    pub edweight: EdWeight,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationVariables {
    pub flux_values: Vec<FluxValue>,
    pub pool_size_values: Vec<PoolSizeValue>,
}

/// Simulation settings of a configuration
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct Simulation {
    #[builder(default = "SimulationType::Auto")]
    pub simulation_type: SimulationType,
    #[builder(default = "SimulationMethod::Auto")]
    pub method: SimulationMethod,
    /// Measurement model reused for the simulation
    #[builder(default = "None")]
    pub model: Option<MeasurementModel>,
    #[builder(default = "None")]
    pub variables: Option<SimulationVariables>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flux_value_defaults() {
        let value = FluxValueBuilder::default()
            .flux("upt")
            .flux_type(FluxValueType::Net)
            .value(1.0)
            .build()
            .unwrap();
        assert_eq!(value.edweight.get(), 1.0);
        assert!(value.lo.is_none());
    }

    #[test]
    fn flux_value_requires_type() {
        let err = FluxValueBuilder::default()
            .flux("upt")
            .value(1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("flux_type"));
    }

    #[test]
    fn pool_size_value_requires_value() {
        let err = PoolSizeValueBuilder::default()
            .pool("Glc")
            .lo(Some(0.5))
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("value"));
    }

    #[test]
    fn simulation_defaults() {
        let simulation = SimulationBuilder::default().build().unwrap();
        assert_eq!(simulation.simulation_type, SimulationType::Auto);
        assert_eq!(simulation.method, SimulationMethod::Auto);
        assert!(simulation.variables.is_none());
    }
}
