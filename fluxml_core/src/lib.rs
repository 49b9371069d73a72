//! Core rust implementation of the FluxML document model and parser, used to describe
//! isotope labeling metabolic flux analysis experiments.
//!
//! The entry points are [`io::fluxml_parse::parse_fluxml`] for in-memory documents and
//! [`document::fluxml::FluxMl::read_xml`] for files. The parsed tree can be checked for dangling
//! references with [`document::integrity::check_references`], and converted into the flat shapes
//! consumed by script generators through the [`interchange`] module.

pub mod document;
pub mod interchange;
pub mod io;
pub mod options;

pub use document::fluxml::{Document, FluxMl, Mixture};
pub use io::fluxml_parse::{parse_document, parse_fluxml, parse_mixture, FluxmlParseError, Parsed};
pub use options::ParseOptions;
