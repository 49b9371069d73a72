use fluxml_core::document::fluxml::FluxMl;
use fluxml_core::interchange::dataset::FluxomicsDataset;
use fluxml_core::io::fluxml_parse::{Diagnostic, FluxmlParser};
use fluxml_core::options::{CoercionPolicy, ParseOptions};

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

/// Parsed FluxML document
#[pyclass]
struct PyFluxml {
    inner: FluxMl,
    diagnostics: Vec<Diagnostic>,
}

fn parse_options(strict: bool, retain_mathml: bool) -> ParseOptions {
    ParseOptions {
        coercion: if strict {
            CoercionPolicy::Strict
        } else {
            CoercionPolicy::Lenient
        },
        retain_mathml,
        ..ParseOptions::default()
    }
}

fn parse(xml: &str, options: ParseOptions) -> PyResult<PyFluxml> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let inner = FluxmlParser::new(options, &mut diagnostics)
        .parse_fluxml(xml)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(PyFluxml { inner, diagnostics })
}

#[pymethods]
impl PyFluxml {
    #[staticmethod]
    #[pyo3(signature = (xml, strict=false, retain_mathml=false))]
    fn from_xml(xml: &str, strict: bool, retain_mathml: bool) -> PyResult<Self> {
        parse(xml, parse_options(strict, retain_mathml))
    }

    #[staticmethod]
    #[pyo3(signature = (path, strict=false, retain_mathml=false))]
    fn read(path: &str, strict: bool, retain_mathml: bool) -> PyResult<Self> {
        let xml = std::fs::read_to_string(path)
            .map_err(|err| PyIOError::new_err(format!("unable to read {path}: {err}")))?;
        parse(&xml, parse_options(strict, retain_mathml))
    }

    fn pool_ids(&self) -> Vec<String> {
        self.inner
            .reaction_network
            .metabolite_pools
            .iter()
            .map(|pool| pool.id.clone())
            .collect()
    }

    fn reaction_ids(&self) -> Vec<String> {
        self.inner
            .reaction_network
            .reactions
            .keys()
            .cloned()
            .collect()
    }

    fn configuration_names(&self) -> Vec<String> {
        self.inner
            .configurations
            .iter()
            .map(|configuration| configuration.name.clone())
            .collect()
    }

    /// Diagnostics reported while parsing, one message per entry
    fn warnings(&self) -> Vec<String> {
        self.diagnostics.iter().map(|diag| diag.to_string()).collect()
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner
            .to_json()
            .map_err(|err| PyValueError::new_err(err.to_string()))
    }

    /// Flat fluxomics dataset (metadata plus reaction network) as JSON
    fn dataset_json(&self) -> PyResult<String> {
        serde_json::to_string(&FluxomicsDataset::from(&self.inner))
            .map_err(|err| PyValueError::new_err(err.to_string()))
    }

    /// Tracer records of every configuration as JSON
    fn tracers_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner.tracers())
            .map_err(|err| PyValueError::new_err(err.to_string()))
    }
}

#[pyfunction]
#[pyo3(signature = (xml, strict=false))]
fn parse_fluxml(xml: &str, strict: bool) -> PyResult<PyFluxml> {
    parse(xml, parse_options(strict, false))
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_fluxml, m)?)?;
    m.add_class::<PyFluxml>()?;
    Ok(())
}
