//! This module provides the measurement records of a configuration: the measurement model (what
//! is measured) and the measurement data (the observed values)
//!
//! Data entries reference model entries by id only, use
//! [`crate::document::integrity::check_references`] to find data without a model entry.
use chrono::NaiveDateTime;
use derive_builder::Builder;
use serde::Serialize;

use super::types::{Atoms, ComposedWeight, DatumType, GroupScale, MathExpression, Row};
use super::ValidationError;

// region Measurement model
/// Error model attached to a measurement definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorModel {
    pub content: Option<MathExpression>,
}

/// A group of labeling measurements, e.g. the mass isotopomers of one fragment
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(error = "ValidationError"))]
pub struct Group {
    #[builder(setter(into))]
    pub id: String,
    /// Measurement times of non-stationary experiments, as written
    #[builder(default = "None")]
    pub times: Option<String>,
    #[builder(default = "GroupScale::Auto")]
    pub scale: GroupScale,
    #[builder(default = "None")]
    pub error_model: Option<ErrorModel>,
    /// Definition of the measured fragment
    #[builder(default = "None")]
    pub content: Option<MathExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelingMeasurement {
    pub groups: Vec<Group>,
}

/// Measured net flux
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetFlux {
    pub id: String,
    pub error_model: Option<ErrorModel>,
    pub content: Option<MathExpression>,
}

/// Measured exchange flux
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XchFlux {
    pub id: String,
    pub error_model: Option<ErrorModel>,
    pub content: Option<MathExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FluxMeasurement {
    pub net_fluxes: Vec<NetFlux>,
    pub xch_fluxes: Vec<XchFlux>,
}

/// Measured pool size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSize {
    pub id: String,
    pub error_model: Option<ErrorModel>,
    pub content: Option<MathExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PoolSizeMeasurement {
    pub pool_sizes: Vec<PoolSize>,
}

/// Measured ratio of net fluxes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetRatio {
    pub id: String,
    pub content: Option<MathExpression>,
}

/// Measured ratio of exchange fluxes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XchRatio {
    pub id: String,
    pub content: Option<MathExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FluxRatios {
    pub net_ratios: Vec<NetRatio>,
    pub xch_ratios: Vec<XchRatio>,
}

/// Measured ratio of pool sizes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSizeRatio {
    pub id: String,
    pub content: Option<MathExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PoolSizeRatios {
    pub pool_size_ratios: Vec<PoolSizeRatio>,
}

/// Definition of everything measured in an experiment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementModel {
    pub labeling_measurement: Option<LabelingMeasurement>,
    pub flux_measurement: Option<FluxMeasurement>,
    pub pool_size_measurement: Option<PoolSizeMeasurement>,
    pub flux_ratios: Option<FluxRatios>,
    pub pool_size_ratios: Option<PoolSizeRatios>,
}

impl MeasurementModel {
    /// Ids of every entry of the model, in document order, section by section
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        if let Some(labeling) = &self.labeling_measurement {
            ids.extend(labeling.groups.iter().map(|g| g.id.as_str()));
        }
        if let Some(fluxes) = &self.flux_measurement {
            ids.extend(fluxes.net_fluxes.iter().map(|f| f.id.as_str()));
            ids.extend(fluxes.xch_fluxes.iter().map(|f| f.id.as_str()));
        }
        if let Some(sizes) = &self.pool_size_measurement {
            ids.extend(sizes.pool_sizes.iter().map(|p| p.id.as_str()));
        }
        if let Some(ratios) = &self.flux_ratios {
            ids.extend(ratios.net_ratios.iter().map(|r| r.id.as_str()));
            ids.extend(ratios.xch_ratios.iter().map(|r| r.id.as_str()));
        }
        if let Some(ratios) = &self.pool_size_ratios {
            ids.extend(ratios.pool_size_ratios.iter().map(|r| r.id.as_str()));
        }
        ids
    }

    /// Whether some entry of the model has the id `id`
    pub fn contains(&self, id: &str) -> bool {
        self.ids().contains(&id)
    }
}
// endregion Measurement model

// region Measurement data
/// Who did what in the experiment, analytics or analysis step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Procedure {
    pub operator: String,
    pub description: String,
}

/// Metadata of a measurement data set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DLabel {
    pub strain: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub start: Option<NaiveDateTime>,
    pub finish: Option<NaiveDateTime>,
    pub experiment: Option<Procedure>,
    pub analytics: Option<Procedure>,
    pub analysis: Option<Procedure>,
    pub comment: Option<String>,
}

/// A single measured value
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(build_fn(validate = "Self::validate", error = "ValidationError"))]
pub struct Datum {
    /// Id of the measurement model entry this value belongs to
    #[builder(setter(into))]
    pub id: String,
    pub value: f64,
    /// Standard deviation of the measurement, must not be negative
    pub stddev: f64,
    /// Row of a mass isotopomer measurement (M+0 is row 1)
    #[builder(default = "None")]
    pub row: Option<Row>,
    /// Time point of non-stationary data
    #[builder(default = "None")]
    pub time: Option<f64>,
    #[builder(default = "None")]
    pub weight: Option<ComposedWeight>,
    #[builder(default = "None")]
    pub pos: Option<Atoms>,
    #[builder(default = "None")]
    pub datum_type: Option<DatumType>,
}

impl DatumBuilder {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(stddev) = self.stddev {
            if !(stddev >= 0.0) {
                return Err(ValidationError::Negative {
                    field: "stddev",
                    value: stddev,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementData {
    pub dlabel: Option<DLabel>,
    pub data: Vec<Datum>,
}

impl MeasurementData {
    /// Data points belonging to the model entry `id`, in document order
    pub fn data_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Datum> + 'a {
        self.data.iter().filter(move |d| d.id == id)
    }
}
// endregion Measurement data

/// Metadata of the measurement section
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MLabel {
    pub date: Option<NaiveDateTime>,
    pub version: Option<String>,
    pub comment: Option<String>,
    pub fluxunit: Option<String>,
    pub poolsizeunit: Option<String>,
    pub timeunit: Option<String>,
}

/// Measurement definitions together with the measured data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub mlabel: Option<MLabel>,
    pub model: MeasurementModel,
    pub data: MeasurementData,
}
