//! Module for parsing FluxML documents into the typed document model
//!
//! The parser walks the XML tree top down, one method per element, and assembles the records of
//! [`crate::document`] bottom up. Structural problems (malformed XML, missing required attributes
//! or elements, records violating the model constraints) abort the parse. Attribute values which
//! can't be converted are handled according to [`CoercionPolicy`](crate::options::CoercionPolicy),
//! by default they are replaced with their default and reported to the [`DiagnosticSink`].
use std::fs;
use std::path::Path;

use roxmltree::{Node, ParsingOptions};
use thiserror::Error;

use crate::document::fluxml::{Document, FluxMl, Mixture};
use crate::document::integrity::{check_references, IntegrityReport};
use crate::document::ValidationError;
use crate::options::ParseOptions;

mod attributes;
mod configuration;
pub mod diagnostics;
mod measurement;
mod network;
mod simulation;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, LogSink};

use attributes::{child, children, element_name, InElement};

/// Result of a successful parse: the document plus everything reported along the way
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub document: T,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a FluxML document with default options
///
/// # Parameters
/// - `xml`: text of the document, the root element must be `fluxml` (possibly namespaced)
///
/// # Returns
/// Parse result which is
/// - `Ok`: the document and the diagnostics reported while parsing it
/// - `Err`: the FluxmlParseError which aborted the parse
///
/// # Examples
/// ```rust
/// use fluxml_core::parse_fluxml;
/// let xml = r#"<fluxml>
///   <reactionnetwork>
///     <metabolitepools>
///       <pool id="A" atoms="3"/>
///       <pool id="B" atoms="3"/>
///     </metabolitepools>
///     <reaction id="v1"><reduct id="A" cfg="abc"/><rproduct id="B" cfg="abc"/></reaction>
///   </reactionnetwork>
///   <configuration name="c1">
///     <input pool="A"><label cfg="100">1.0</label></input>
///   </configuration>
/// </fluxml>"#;
/// let parsed = parse_fluxml(xml).unwrap();
/// assert_eq!(parsed.document.reaction_network.metabolite_pools.len(), 2);
/// assert!(parsed.diagnostics.is_empty());
/// ```
pub fn parse_fluxml(xml: &str) -> Result<Parsed<FluxMl>, FluxmlParseError> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let document =
        FluxmlParser::new(ParseOptions::default(), &mut diagnostics).parse_fluxml(xml)?;
    Ok(Parsed {
        document,
        diagnostics,
    })
}

/// Parse a substrate mixture document with default options
pub fn parse_mixture(xml: &str) -> Result<Parsed<Mixture>, FluxmlParseError> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let document =
        FluxmlParser::new(ParseOptions::default(), &mut diagnostics).parse_mixture(xml)?;
    Ok(Parsed {
        document,
        diagnostics,
    })
}

/// Parse either kind of document with default options, dispatching on the root element
pub fn parse_document(xml: &str) -> Result<Parsed<Document>, FluxmlParseError> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let document =
        FluxmlParser::new(ParseOptions::default(), &mut diagnostics).parse_document(xml)?;
    Ok(Parsed {
        document,
        diagnostics,
    })
}

/// Enum representing the ways a parse can fail
#[derive(Debug, Error)]
pub enum FluxmlParseError {
    /// The text isn't well-formed XML
    #[error("document is not well-formed XML: {0}")]
    MalformedXml(#[from] roxmltree::Error),
    /// The root element isn't the one expected
    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
    /// A required attribute is absent
    #[error("<{element}> is missing required attribute `{attribute}`: {snippet}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        snippet: String,
    },
    /// A required child element is absent
    #[error("<{parent}> is missing required element <{element}>")]
    MissingElement {
        parent: String,
        element: &'static str,
    },
    /// An attribute couldn't be converted, only raised under the strict coercion policy
    #[error("`{attribute}` = {value:?} of <{element}> is not a valid {expected}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        expected: &'static str,
    },
    /// The record built from an element violates the document model constraints
    #[error("invalid <{element}>: {source}")]
    InvalidModel {
        element: String,
        source: ValidationError,
    },
    /// The reference check found ids which don't resolve
    #[error("dangling references: {0}")]
    DanglingReferences(IntegrityReport),
    /// The document file couldn't be read
    #[error("unable to read {path}: {source}")]
    UnableToRead {
        path: String,
        source: std::io::Error,
    },
}

/// FluxML parser, holding the options and the diagnostic sink of one or more parses
pub struct FluxmlParser<'s> {
    options: ParseOptions,
    sink: &'s mut dyn DiagnosticSink,
}

impl<'s> FluxmlParser<'s> {
    /// Create a new parser
    ///
    /// # Examples
    /// ```rust
    /// use fluxml_core::io::fluxml_parse::{FluxmlParser, LogSink};
    /// use fluxml_core::options::ParseOptions;
    /// let xml = r#"<mixture objvalue="2.5">
    ///   <input pool="Glc" id="in1"><label cfg="110000" cost="10">0.5</label></input>
    /// </mixture>"#;
    /// let mut sink = LogSink;
    /// let mut parser = FluxmlParser::new(ParseOptions::default(), &mut sink);
    /// let mixture = parser.parse_mixture(xml).unwrap();
    /// assert_eq!(mixture.objvalue, Some(2.5));
    /// ```
    pub fn new(options: ParseOptions, sink: &'s mut dyn DiagnosticSink) -> FluxmlParser<'s> {
        FluxmlParser { options, sink }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a document rooted at either `fluxml` or `mixture`
    pub fn parse_document(&mut self, xml: &str) -> Result<Document, FluxmlParseError> {
        let tree = read_tree(xml)?;
        let root = tree.root_element();
        match root_kind(root) {
            Some(RootKind::FluxMl) => Ok(Document::FluxMl(self.fluxml(root)?)),
            Some(RootKind::Mixture) => Ok(Document::Mixture(self.mixture(root)?)),
            None => Err(FluxmlParseError::UnexpectedRoot {
                expected: "fluxml",
                found: element_name(root),
            }),
        }
    }

    /// Parse a document rooted at `fluxml`
    pub fn parse_fluxml(&mut self, xml: &str) -> Result<FluxMl, FluxmlParseError> {
        let tree = read_tree(xml)?;
        let root = tree.root_element();
        match root_kind(root) {
            Some(RootKind::FluxMl) => self.fluxml(root),
            _ => Err(FluxmlParseError::UnexpectedRoot {
                expected: "fluxml",
                found: element_name(root),
            }),
        }
    }

    /// Parse a document rooted at `mixture`
    pub fn parse_mixture(&mut self, xml: &str) -> Result<Mixture, FluxmlParseError> {
        let tree = read_tree(xml)?;
        let root = tree.root_element();
        match root_kind(root) {
            Some(RootKind::Mixture) => self.mixture(root),
            _ => Err(FluxmlParseError::UnexpectedRoot {
                expected: "mixture",
                found: element_name(root),
            }),
        }
    }

    fn fluxml(&mut self, root: Node) -> Result<FluxMl, FluxmlParseError> {
        log::debug!("Parsing FluxML document");
        let info = match child(root, "info") {
            Some(node) => Some(self.info(node)),
            None => None,
        };
        let network_node = required_child(root, "reactionnetwork")?;
        let reaction_network = self.reaction_network(network_node)?;
        let constraints = match child(root, "constraints") {
            Some(node) => Some(self.constraints(node)),
            None => None,
        };
        let mut configurations = Vec::new();
        for node in children(root, "configuration") {
            configurations.push(self.configuration(node)?);
        }
        let doc =
            FluxMl::new(info, reaction_network, constraints, configurations).in_element(root)?;
        log::debug!(
            "Parsed {} pools, {} reactions and {} configurations",
            doc.reaction_network.metabolite_pools.len(),
            doc.reaction_network.reactions.len(),
            doc.configurations.len()
        );

        if self.options.check_references {
            let report = check_references(&doc);
            if !report.is_clean() {
                return Err(FluxmlParseError::DanglingReferences(report));
            }
        }
        Ok(doc)
    }

    fn mixture(&mut self, root: Node) -> Result<Mixture, FluxmlParseError> {
        log::debug!("Parsing mixture document");
        let objvalue = self.attribute::<f64>(root, "objvalue")?;
        let mut inputs = Vec::new();
        for node in children(root, "input") {
            inputs.push(self.input(node)?);
        }
        Mixture::new(inputs, objvalue).in_element(root)
    }
}

impl FluxMl {
    /// Read a FluxML file, reporting diagnostics through [`LogSink`]
    ///
    /// # Examples
    /// ```rust,no_run
    /// use fluxml_core::FluxMl;
    /// let doc = FluxMl::read_xml("model.fml").unwrap();
    /// println!("{} configurations", doc.configurations.len());
    /// ```
    pub fn read_xml<P: AsRef<Path>>(path: P) -> Result<FluxMl, FluxmlParseError> {
        Self::read_xml_with(path, ParseOptions::default(), &mut LogSink)
    }

    /// Read a FluxML file with caller supplied options and sink
    pub fn read_xml_with<P: AsRef<Path>>(
        path: P,
        options: ParseOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<FluxMl, FluxmlParseError> {
        let path = path.as_ref();
        let xml = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(source) => {
                return Err(FluxmlParseError::UnableToRead {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        FluxmlParser::new(options, sink).parse_fluxml(&xml)
    }
}

enum RootKind {
    FluxMl,
    Mixture,
}

/// Classify the root element by local name, namespaced roots are accepted
fn root_kind(root: Node) -> Option<RootKind> {
    let name = root.tag_name().name();
    if name.ends_with("fluxml") {
        Some(RootKind::FluxMl)
    } else if name == "mixture" {
        Some(RootKind::Mixture)
    } else {
        None
    }
}

fn read_tree(xml: &str) -> Result<roxmltree::Document<'_>, FluxmlParseError> {
    // FluxML files commonly start with a DOCTYPE declaration
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(roxmltree::Document::parse_with_options(xml, options)?)
}

/// First child called `name`, failing the parse if there is none
pub(crate) fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>, FluxmlParseError> {
    child(node, name).ok_or_else(|| FluxmlParseError::MissingElement {
        parent: element_name(node),
        element: name,
    })
}
