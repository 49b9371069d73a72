//! Module providing JSON IO for fluxomics datasets and parsed FluxML documents
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::document::fluxml::FluxMl;
use crate::interchange::dataset::FluxomicsDataset;

impl FluxomicsDataset {
    /// Read a dataset from a JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<FluxomicsDataset, JsonError> {
        let dataset_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(err.to_string())),
        };
        FluxomicsDataset::from_json_str(&dataset_str)
    }

    /// Parse a dataset from JSON text
    pub fn from_json_str(json: &str) -> Result<FluxomicsDataset, JsonError> {
        match serde_json::from_str::<FluxomicsDataset>(json) {
            Ok(dataset) => Ok(dataset),
            Err(err) => Err(JsonError::UnableToParse(err.to_string())),
        }
    }

    /// Write the dataset to a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let dataset_string = serde_json::to_string_pretty(self)?;
        fs::write(path, dataset_string)?;
        Ok(())
    }
}

impl FluxMl {
    /// Serialize the whole document tree to JSON
    ///
    /// Pools and reactions are written as objects keyed by id, in document order. Dates use the
    /// ISO 8601 form.
    pub fn to_json(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Serde json error")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
