//! Helpers for extracting attributes, child elements and text from the XML tree
use std::num::IntErrorKind;

use chrono::NaiveDateTime;
use roxmltree::Node;

use crate::document::ValidationError;
use crate::io::fluxml_parse::diagnostics::{Diagnostic, DiagnosticKind};
use crate::io::fluxml_parse::{FluxmlParseError, FluxmlParser};
use crate::options::CoercionPolicy;

/// Format of every timestamp in a FluxML document
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Longest element snippet put into an error message, in characters
const SNIPPET_LEN: usize = 256;

// region Conversion
/// Scalar types an attribute can be converted to
pub(crate) trait AttributeValue: Sized {
    /// Name of the type, used in diagnostics
    const EXPECTED: &'static str;

    fn convert(raw: &str) -> Option<Self>;
}

impl AttributeValue for String {
    const EXPECTED: &'static str = "string";

    fn convert(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl AttributeValue for f64 {
    const EXPECTED: &'static str = "float";

    fn convert(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl AttributeValue for i64 {
    const EXPECTED: &'static str = "integer";

    /// Integers beyond the i64 range saturate, so that range checks reject them
    fn convert(raw: &str) -> Option<Self> {
        match raw.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Some(i64::MAX),
                IntErrorKind::NegOverflow => Some(i64::MIN),
                _ => None,
            },
        }
    }
}

/// Attach the element a validation error came from
pub(crate) trait InElement<T> {
    fn in_element(self, node: Node) -> Result<T, FluxmlParseError>;
}

impl<T> InElement<T> for Result<T, ValidationError> {
    fn in_element(self, node: Node) -> Result<T, FluxmlParseError> {
        self.map_err(|source| FluxmlParseError::InvalidModel {
            element: element_name(node),
            source,
        })
    }
}
// endregion Conversion

// region Tree helpers
pub(crate) fn element_name(node: Node) -> String {
    node.tag_name().name().to_string()
}

/// First child element with local name `name`
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// First child element whose local name is one of `names`, trying the names in order
pub(crate) fn first_child<'a, 'input>(
    node: Node<'a, 'input>,
    names: &[&str],
) -> Option<Node<'a, 'input>> {
    names.iter().find_map(|name| child(node, name))
}

/// Every child element with local name `name`, in document order
pub(crate) fn children<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Vec<Node<'a, 'input>> {
    node.children()
        .filter(|n| n.is_element() && n.tag_name().name() == name)
        .collect()
}

/// Concatenated text of the element, trimmed. `None` if the element has no text.
pub(crate) fn element_text(node: Node) -> Option<String> {
    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    if text.is_empty() {
        return None;
    }
    Some(text.trim().to_string())
}

/// Text before the first child element, trimmed. `None` if there is none.
pub(crate) fn leading_text(node: Node) -> Option<String> {
    let first = node.first_child().filter(|n| n.is_text())?;
    let text = first.text()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

/// Text of the first child called `name`
pub(crate) fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name).and_then(element_text)
}

/// Source text of the element, as written in the document
pub(crate) fn source_text<'input>(node: Node<'_, 'input>) -> &'input str {
    &node.document().input_text()[node.range()]
}

/// Source text of the element, cut down for error messages
pub(crate) fn snippet(node: Node) -> String {
    let source = source_text(node);
    if source.chars().count() <= SNIPPET_LEN {
        return source.to_string();
    }
    let mut cut: String = source.chars().take(SNIPPET_LEN).collect();
    cut.push_str("...");
    cut
}

/// Read a boolean attribute: only `true` (in any case) is true, absent gives `default`
pub(crate) fn bool_attribute(node: Node, name: &str, default: bool) -> bool {
    match node.attribute(name) {
        Some(value) => value.to_lowercase() == "true",
        None => default,
    }
}
// endregion Tree helpers

// region Parser methods
impl FluxmlParser<'_> {
    pub(crate) fn report(&mut self, node: Node, kind: DiagnosticKind) {
        self.sink.report(Diagnostic {
            element: element_name(node),
            kind,
        });
    }

    /// Read an optional attribute
    ///
    /// Absent attributes give `None`. Values which can't be converted give `None` plus a
    /// diagnostic under the lenient policy, and fail the parse under the strict one.
    pub(crate) fn attribute<T: AttributeValue>(
        &mut self,
        node: Node,
        name: &str,
    ) -> Result<Option<T>, FluxmlParseError> {
        match node.attribute(name) {
            Some(raw) => self.coerce(node, name, raw),
            None => Ok(None),
        }
    }

    /// Read an attribute, falling back to `default` when it is absent or can't be converted
    pub(crate) fn attribute_or<T: AttributeValue>(
        &mut self,
        node: Node,
        name: &str,
        default: T,
    ) -> Result<T, FluxmlParseError> {
        Ok(self.attribute(node, name)?.unwrap_or(default))
    }

    /// Read an attribute which must be present
    pub(crate) fn required_attribute(
        &self,
        node: Node,
        name: &'static str,
    ) -> Result<String, FluxmlParseError> {
        node.attribute(name)
            .map(|value| value.to_string())
            .ok_or_else(|| FluxmlParseError::MissingAttribute {
                element: element_name(node),
                attribute: name,
                snippet: snippet(node),
            })
    }

    /// Read an attribute holding one value of a closed set, `E::from_str` decides what is valid
    pub(crate) fn enum_attribute<E>(
        &mut self,
        node: Node,
        name: &str,
    ) -> Result<Option<E>, FluxmlParseError>
    where
        E: std::str::FromStr<Err = ValidationError>,
    {
        match node.attribute(name) {
            Some(raw) => raw.parse::<E>().map(Some).in_element(node),
            None => Ok(None),
        }
    }

    /// Convert the text of the element, with the same policy as attributes
    pub(crate) fn text_value<T: AttributeValue>(
        &mut self,
        node: Node,
    ) -> Result<Option<T>, FluxmlParseError> {
        match element_text(node) {
            Some(raw) => self.coerce(node, "#text", &raw),
            None => Ok(None),
        }
    }

    /// Read the date held by the child called `name`
    pub(crate) fn datetime(&mut self, node: Node, name: &str) -> Option<NaiveDateTime> {
        let date_node = child(node, name)?;
        let text = element_text(date_node)?;
        match NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                self.report(date_node, DiagnosticKind::UnparsedDate { value: text });
                None
            }
        }
    }

    fn coerce<T: AttributeValue>(
        &mut self,
        node: Node,
        name: &str,
        raw: &str,
    ) -> Result<Option<T>, FluxmlParseError> {
        if let Some(value) = T::convert(raw) {
            return Ok(Some(value));
        }
        match self.options.coercion {
            CoercionPolicy::Strict => Err(FluxmlParseError::InvalidAttribute {
                element: element_name(node),
                attribute: name.to_string(),
                value: raw.to_string(),
                expected: T::EXPECTED,
            }),
            CoercionPolicy::Lenient => {
                self.report(
                    node,
                    DiagnosticKind::DefaultedAttribute {
                        attribute: name.to_string(),
                        value: raw.to_string(),
                        expected: T::EXPECTED,
                    },
                );
                Ok(None)
            }
        }
    }
}
// endregion Parser methods

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::InputType;
    use crate::io::fluxml_parse::diagnostics::Diagnostic;
    use crate::options::ParseOptions;

    fn strict() -> ParseOptions {
        ParseOptions {
            coercion: CoercionPolicy::Strict,
            ..Default::default()
        }
    }

    #[test]
    fn numeric_values_are_trimmed() {
        assert_eq!(f64::convert(" 1.5 "), Some(1.5));
        assert_eq!(i64::convert("12\n"), Some(12));
        assert_eq!(i64::convert("3.0"), None);
        assert_eq!(i64::convert("99999999999999999999"), Some(i64::MAX));
        assert_eq!(i64::convert("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(String::convert(" a "), Some(" a ".to_string()));
    }

    #[test]
    fn lenient_coercion_reports() {
        let xml = r#"<variant cfg="ab" ratio="abc"/>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let node = doc.root_element();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut parser = FluxmlParser::new(ParseOptions::default(), &mut sink);
        let ratio: Option<f64> = parser.attribute(node, "ratio").unwrap();
        assert!(ratio.is_none());
        let missing: f64 = parser.attribute_or(node, "size", 1.0).unwrap();
        assert_eq!(missing, 1.0);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].element, "variant");
    }

    #[test]
    fn strict_coercion_fails() {
        let xml = r#"<variant cfg="ab" ratio="abc"/>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut parser = FluxmlParser::new(strict(), &mut sink);
        let err = parser
            .attribute::<f64>(doc.root_element(), "ratio")
            .unwrap_err();
        match err {
            FluxmlParseError::InvalidAttribute {
                element, attribute, ..
            } => {
                assert_eq!(element, "variant");
                assert_eq!(attribute, "ratio");
            }
            _ => panic!("Incorrect error"),
        }
    }

    #[test]
    fn missing_required_attribute() {
        let xml = r#"<pool atoms="3"/>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let parser = FluxmlParser::new(ParseOptions::default(), &mut sink);
        let err = parser
            .required_attribute(doc.root_element(), "id")
            .unwrap_err();
        match err {
            FluxmlParseError::MissingAttribute {
                element,
                attribute,
                snippet,
            } => {
                assert_eq!(element, "pool");
                assert_eq!(attribute, "id");
                assert_eq!(snippet, r#"<pool atoms="3"/>"#);
            }
            _ => panic!("Incorrect error"),
        }
    }

    #[test]
    fn booleans() {
        let xml = r#"<r a="false" b="yes" c="TRUE" d="1"/>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let node = doc.root_element();
        assert!(!bool_attribute(node, "a", true));
        assert!(!bool_attribute(node, "b", true));
        assert!(bool_attribute(node, "c", false));
        assert!(!bool_attribute(node, "d", true));
        assert!(bool_attribute(node, "missing", true));
    }

    #[test]
    fn enum_attribute_rejects_unknown() {
        let xml = r#"<input pool="A" type="unknown"/>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut parser = FluxmlParser::new(ParseOptions::default(), &mut sink);
        let err = parser
            .enum_attribute::<InputType>(doc.root_element(), "type")
            .unwrap_err();
        assert!(matches!(
            err,
            FluxmlParseError::InvalidModel {
                source: ValidationError::InvalidVariant { .. },
                ..
            }
        ));
    }

    #[test]
    fn text_helpers() {
        let xml = "<info><name>  Model  </name><comment/><date>2024-01-02 03:04:05</date>\
                   <version>bad</version></info>";
        let doc = roxmltree::Document::parse(xml).unwrap();
        let node = doc.root_element();
        assert_eq!(child_text(node, "name"), Some("Model".to_string()));
        assert_eq!(child_text(node, "comment"), None);
        assert_eq!(child_text(node, "strain"), None);
        assert_eq!(children(node, "name").len(), 1);
        assert_eq!(
            first_child(node, &["missing", "version"]).map(element_name),
            Some("version".to_string())
        );

        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut parser = FluxmlParser::new(ParseOptions::default(), &mut sink);
        let date = parser.datetime(node, "date").unwrap();
        assert_eq!(date.to_string(), "2024-01-02 03:04:05");
        assert!(parser.datetime(node, "version").is_none());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn leading_text_ignores_trailing_nodes() {
        let doc = roxmltree::Document::parse("<label> 0.5 <sep/>0.25</label>").unwrap();
        assert_eq!(leading_text(doc.root_element()), Some("0.5".to_string()));
        assert_eq!(element_text(doc.root_element()), Some("0.5 0.25".to_string()));
        let doc = roxmltree::Document::parse("<label><sep/>1</label>").unwrap();
        assert_eq!(leading_text(doc.root_element()), None);
    }

    #[test]
    fn long_snippets_are_cut() {
        let xml = format!("<pool atoms=\"3\">{}</pool>", "x".repeat(400));
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let cut = snippet(doc.root_element());
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), SNIPPET_LEN + 3);
    }
}
