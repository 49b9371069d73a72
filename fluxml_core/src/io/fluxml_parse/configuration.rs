//! Parsing of document metadata, constraints, math content and configurations with their inputs
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use roxmltree::Node;

use crate::document::configuration::{
    Configuration, ConfigurationBuilder, Input, InputBuilder, Label, LabelBuilder, LabelValue,
    Sep,
};
use crate::document::constraints::Constraints;
use crate::document::info::Info;
use crate::document::types::{InputType, MathExpression, SymbolicExpression};
use crate::io::fluxml_parse::attributes::{
    bool_attribute, child, child_text, children, element_text, first_child, leading_text,
    source_text, InElement,
};
use crate::io::fluxml_parse::diagnostics::DiagnosticKind;
use crate::io::fluxml_parse::{FluxmlParseError, FluxmlParser};

impl FluxmlParser<'_> {
    pub(super) fn info(&mut self, node: Node) -> Info {
        Info {
            name: child_text(node, "name"),
            version: child_text(node, "version"),
            date: self.datetime(node, "date"),
            comment: child_text(node, "comment"),
            signature: self.signature(node),
            modeler: child_text(node, "modeler"),
            strain: child_text(node, "strain"),
        }
    }

    fn signature(&mut self, node: Node) -> Option<Vec<u8>> {
        let signature_node = child(node, "signature")?;
        // base64 text may be wrapped over several lines
        let text: String = element_text(signature_node)?
            .split_whitespace()
            .collect();
        match STANDARD.decode(text.as_bytes()) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                self.report(
                    signature_node,
                    DiagnosticKind::UnparsedSignature {
                        reason: err.to_string(),
                    },
                );
                None
            }
        }
    }

    /// Content of a constraint, error model or measurement definition element
    ///
    /// A `textual` child wins over a MathML `math` child.
    pub(super) fn math_content(&mut self, node: Node) -> Option<MathExpression> {
        if let Some(text) = child_text(node, "textual") {
            if !text.is_empty() {
                return Some(MathExpression::Textual(text));
            }
        }
        let math = child(node, "math")?;
        if self.options.retain_mathml {
            return Some(MathExpression::Symbolic(SymbolicExpression::from_source(
                source_text(math),
            )));
        }
        self.report(node, DiagnosticKind::MathMlSkipped);
        None
    }

    pub(super) fn constraints(&mut self, node: Node) -> Constraints {
        let naming = self.options.constraint_naming;
        let net = first_child(node, naming.net_tags()).and_then(|n| self.math_content(n));
        let xch = first_child(node, naming.xch_tags()).and_then(|n| self.math_content(n));
        let psize = child(node, "psize").and_then(|n| self.math_content(n));
        Constraints { net, xch, psize }
    }

    pub(super) fn configuration(&mut self, node: Node) -> Result<Configuration, FluxmlParseError> {
        let name = self.required_attribute(node, "name")?;
        log::debug!("Parsing configuration {}", name);
        let mut inputs = Vec::new();
        for input_node in children(node, "input") {
            inputs.push(self.input(input_node)?);
        }
        let constraints = match child(node, "constraints") {
            Some(constraints_node) => Some(self.constraints(constraints_node)),
            None => None,
        };
        let measurement = match child(node, "measurement") {
            Some(measurement_node) => Some(self.measurement(measurement_node)?),
            None => None,
        };
        let simulation = match child(node, "simulation") {
            Some(simulation_node) => Some(self.simulation(simulation_node)?),
            None => None,
        };
        ConfigurationBuilder::default()
            .name(name)
            .stationary(bool_attribute(node, "stationary", true))
            .time(self.attribute::<f64>(node, "time")?)
            .comment(child_text(node, "comment"))
            .inputs(inputs)
            .constraints(constraints)
            .measurement(measurement)
            .simulation(simulation)
            .build()
            .in_element(node)
    }

    pub(super) fn input(&mut self, node: Node) -> Result<Input, FluxmlParseError> {
        let pool = self.required_attribute(node, "pool")?;
        let input_type = self
            .enum_attribute::<InputType>(node, "type")?
            .unwrap_or_default();
        let mut labels = Vec::new();
        for label_node in children(node, "label") {
            labels.push(self.label(label_node)?);
        }
        InputBuilder::default()
            .pool(pool)
            .input_type(input_type)
            .profile(self.attribute::<String>(node, "profile")?)
            .id(self.attribute::<String>(node, "id")?)
            .labels(labels)
            .build()
            .in_element(node)
    }

    fn label(&mut self, node: Node) -> Result<Label, FluxmlParseError> {
        let cfg = self.required_attribute(node, "cfg")?;
        // Text after a <sep/> isn't part of the value
        let value = leading_text(node).map(|text| self.label_value(node, text));
        let separators: Vec<Sep> = children(node, "sep").into_iter().map(|_| Sep).collect();
        LabelBuilder::default()
            .cfg(cfg)
            .purity(self.attribute::<String>(node, "purity")?)
            .cost(self.attribute::<f64>(node, "cost")?)
            .value(value)
            .separators(if separators.is_empty() {
                None
            } else {
                Some(separators)
            })
            .build()
            .in_element(node)
    }

    /// Label text is a fraction when it parses as a number, an expression otherwise
    fn label_value(&mut self, node: Node, text: String) -> LabelValue {
        match text.parse::<f64>() {
            Ok(fraction) => LabelValue::Fraction(fraction),
            Err(_) => {
                self.report(
                    node,
                    DiagnosticKind::LabelValueRetained {
                        value: text.clone(),
                    },
                );
                LabelValue::Expression(MathExpression::Textual(text))
            }
        }
    }
}
