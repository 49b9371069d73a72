//! Options controlling how strictly FluxML documents are read
use derive_builder::Builder;

/// Options for a single parse
///
/// Every parse gets its own copy, there is no process wide configuration.
///
/// # Examples
/// ```rust
/// use fluxml_core::options::{CoercionPolicy, ParseOptionsBuilder};
/// let options = ParseOptionsBuilder::default()
///     .coercion(CoercionPolicy::Strict)
///     .build()
///     .unwrap();
/// assert!(!options.retain_mathml);
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(default)]
pub struct ParseOptions {
    /// What to do with attribute values that can't be converted to the expected type
    pub coercion: CoercionPolicy,
    /// Which tag names are accepted for net and exchange flux constraints
    pub constraint_naming: ConstraintNaming,
    /// Keep MathML content as an opaque [`crate::document::types::SymbolicExpression`]
    /// instead of dropping it
    pub retain_mathml: bool,
    /// Run [`crate::document::integrity::check_references`] after assembly and fail on
    /// dangling references
    pub check_references: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            coercion: CoercionPolicy::Lenient,
            constraint_naming: ConstraintNaming::Either,
            retain_mathml: false,
            check_references: false,
        }
    }
}

/// Enum used to specify how attribute coercion failures are handled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    /// Substitute the default value and report a diagnostic
    #[default]
    Lenient,
    /// Fail the parse with [`crate::io::fluxml_parse::FluxmlParseError::InvalidAttribute`]
    Strict,
}

/// Naming convention for the flux constraint elements
///
/// The FluxML schema names them `net` and `xch`, while many files in the wild use
/// `netto` and `exchange`. Documents carry nothing that says which one is in force.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConstraintNaming {
    /// Accept both, preferring the schema names when both are present
    #[default]
    Either,
    /// Only `net` and `xch`
    Schema,
    /// Only `netto` and `exchange`
    Legacy,
}

impl ConstraintNaming {
    /// Tag names accepted for net flux constraints, in lookup order
    pub fn net_tags(&self) -> &'static [&'static str] {
        match self {
            ConstraintNaming::Either => &["net", "netto"],
            ConstraintNaming::Schema => &["net"],
            ConstraintNaming::Legacy => &["netto"],
        }
    }

    /// Tag names accepted for exchange flux constraints, in lookup order
    pub fn xch_tags(&self) -> &'static [&'static str] {
        match self {
            ConstraintNaming::Either => &["xch", "exchange"],
            ConstraintNaming::Schema => &["xch"],
            ConstraintNaming::Legacy => &["exchange"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.coercion, CoercionPolicy::Lenient);
        assert_eq!(options.constraint_naming, ConstraintNaming::Either);
        assert!(!options.check_references);
    }

    #[test]
    fn builder_keeps_unset_defaults() {
        let options = ParseOptionsBuilder::default()
            .check_references(true)
            .build()
            .unwrap();
        assert!(options.check_references);
        assert_eq!(options.coercion, CoercionPolicy::Lenient);
    }

    #[test]
    fn constraint_tags() {
        assert_eq!(ConstraintNaming::Either.net_tags(), &["net", "netto"]);
        assert_eq!(ConstraintNaming::Legacy.xch_tags(), &["exchange"]);
        assert_eq!(ConstraintNaming::Schema.xch_tags(), &["xch"]);
    }
}
