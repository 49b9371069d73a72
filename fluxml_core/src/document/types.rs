//! Constrained scalar types shared by the FluxML records.
//!
//! Bounded integers and floats reject values outside their inclusive schema ranges on
//! construction, enumerations only accept their closed set of strings, and math expressions are
//! a tagged variant so callers can match on the representation.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

// region Bounded numbers
macro_rules! bounded_integer {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $field:literal, $min:literal, $max:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Smallest accepted value
            pub const MIN: $inner = $min;
            /// Largest accepted value
            pub const MAX: $inner = $max;

            /// Create a new value, naming `field` in the error if it is out of range
            pub fn checked(field: &'static str, value: i64) -> Result<Self, ValidationError> {
                if value < Self::MIN as i64 || value > Self::MAX as i64 {
                    return Err(ValidationError::OutOfRange {
                        field,
                        value: value as f64,
                        min: Self::MIN as f64,
                        max: Self::MAX as f64,
                    });
                }
                Ok(Self(value as $inner))
            }

            /// Get the underlying value
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::checked($field, value)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

bounded_integer!(
    /// Number of labelable atom positions of a pool, in `[0, 1024]`
    Atoms,
    u16,
    "atoms",
    0,
    1024
);
bounded_integer!(
    /// Weight of a measurement, in `[0, 16]`
    Weight,
    u8,
    "weight",
    0,
    16
);
bounded_integer!(
    /// 1-based row of a mass spectrometry measurement, in `[1, 256]`
    Row,
    u16,
    "row",
    1,
    256
);

impl Default for Atoms {
    fn default() -> Self {
        Atoms(0)
    }
}

/// Experimental design weight, in `[0.0, 1.0]`
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EdWeight(f64);

impl EdWeight {
    /// Create a new weight, naming `field` in the error if it is out of range
    pub fn checked(field: &'static str, value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(EdWeight(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for EdWeight {
    fn default() -> Self {
        EdWeight(1.0)
    }
}

impl TryFrom<f64> for EdWeight {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        EdWeight::checked("edweight", value)
    }
}
// endregion Bounded numbers

// region Pattern strings
/// Weight of a datum as written in the document, `n` or `n,m`
///
/// The pattern isn't enforced on construction, use [`ComposedWeight::weights`] to split and check
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComposedWeight(String);

impl ComposedWeight {
    pub fn new(raw: impl Into<String>) -> Self {
        ComposedWeight(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the weight into its bounded components
    ///
    /// Returns `None` if a component isn't an integer.
    pub fn weights(&self) -> Option<Result<Vec<Weight>, ValidationError>> {
        let mut raw_weights = Vec::new();
        for part in self.0.split(',') {
            raw_weights.push(part.trim().parse::<i64>().ok()?);
        }
        Some(raw_weights.into_iter().map(Weight::try_from).collect())
    }
}
// endregion Pattern strings

// region Enumerations
/// Representation used for the labeling state of an input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Full isotopomer fractions
    #[default]
    Isotopomer,
    /// Cumulative isotopomer fractions
    Cumomer,
    /// Elementary metabolite units
    Emu,
}

impl InputType {
    pub const VALUES: &'static [&'static str] = &["isotopomer", "cumomer", "emu"];
}

impl FromStr for InputType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isotopomer" => Ok(InputType::Isotopomer),
            "cumomer" => Ok(InputType::Cumomer),
            "emu" => Ok(InputType::Emu),
            other => Err(invalid_variant("type", other, Self::VALUES)),
        }
    }
}

impl Display for InputType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InputType::Isotopomer => write!(f, "isotopomer"),
            InputType::Cumomer => write!(f, "cumomer"),
            InputType::Emu => write!(f, "emu"),
        }
    }
}

/// Scaling of a labeling measurement group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupScale {
    /// Scale factor is estimated
    #[default]
    Auto,
    /// Measurements are already normalized
    One,
}

impl GroupScale {
    pub const VALUES: &'static [&'static str] = &["auto", "one"];
}

impl FromStr for GroupScale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(GroupScale::Auto),
            "one" => Ok(GroupScale::One),
            other => Err(invalid_variant("scale", other, Self::VALUES)),
        }
    }
}

impl Display for GroupScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupScale::Auto => write!(f, "auto"),
            GroupScale::One => write!(f, "one"),
        }
    }
}

/// Type of a mass spectrometry datum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DatumType {
    /// Singlet
    S,
    /// Left doublet
    DL,
    /// Right doublet
    DR,
    /// Double doublet
    DD,
    /// Triplet
    T,
}

impl DatumType {
    pub const VALUES: &'static [&'static str] = &["S", "DL", "DR", "DD", "T"];
}

impl FromStr for DatumType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(DatumType::S),
            "DL" => Ok(DatumType::DL),
            "DR" => Ok(DatumType::DR),
            "DD" => Ok(DatumType::DD),
            "T" => Ok(DatumType::T),
            other => Err(invalid_variant("type", other, Self::VALUES)),
        }
    }
}

impl Display for DatumType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DatumType::S => "S",
            DatumType::DL => "DL",
            DatumType::DR => "DR",
            DatumType::DD => "DD",
            DatumType::T => "T",
        };
        write!(f, "{}", text)
    }
}

/// How the labeling system of a simulation is balanced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationType {
    #[default]
    Auto,
    Explicit,
    Full,
}

impl SimulationType {
    pub const VALUES: &'static [&'static str] = &["auto", "explicit", "full"];
}

impl FromStr for SimulationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(SimulationType::Auto),
            "explicit" => Ok(SimulationType::Explicit),
            "full" => Ok(SimulationType::Full),
            other => Err(invalid_variant("type", other, Self::VALUES)),
        }
    }
}

impl Display for SimulationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationType::Auto => write!(f, "auto"),
            SimulationType::Explicit => write!(f, "explicit"),
            SimulationType::Full => write!(f, "full"),
        }
    }
}

/// Method used for the labeling simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMethod {
    #[default]
    Auto,
    Cumomer,
    Emu,
}

impl SimulationMethod {
    pub const VALUES: &'static [&'static str] = &["auto", "cumomer", "emu"];
}

impl FromStr for SimulationMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(SimulationMethod::Auto),
            "cumomer" => Ok(SimulationMethod::Cumomer),
            "emu" => Ok(SimulationMethod::Emu),
            other => Err(invalid_variant("method", other, Self::VALUES)),
        }
    }
}

impl Display for SimulationMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationMethod::Auto => write!(f, "auto"),
            SimulationMethod::Cumomer => write!(f, "cumomer"),
            SimulationMethod::Emu => write!(f, "emu"),
        }
    }
}

/// Whether a flux value refers to the net or the exchange flux
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FluxValueType {
    Net,
    Xch,
}

impl FluxValueType {
    pub const VALUES: &'static [&'static str] = &["net", "xch"];
}

impl FromStr for FluxValueType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "net" => Ok(FluxValueType::Net),
            "xch" => Ok(FluxValueType::Xch),
            other => Err(invalid_variant("type", other, Self::VALUES)),
        }
    }
}

impl Display for FluxValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FluxValueType::Net => write!(f, "net"),
            FluxValueType::Xch => write!(f, "xch"),
        }
    }
}

fn invalid_variant(
    field: &'static str,
    value: &str,
    allowed: &'static [&'static str],
) -> ValidationError {
    ValidationError::InvalidVariant {
        field,
        value: value.to_string(),
        allowed,
    }
}
// endregion Enumerations

// region Math expressions
/// Payload of constraint, measurement and label elements
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MathExpression {
    /// Formula written in the `textual` syntax, e.g. `v1 + v2 = 3`
    Textual(String),
    /// MathML content, kept but not interpreted
    Symbolic(SymbolicExpression),
}

impl MathExpression {
    /// Get the formula text, if this is a textual expression
    pub fn as_textual(&self) -> Option<&str> {
        match self {
            MathExpression::Textual(text) => Some(text),
            MathExpression::Symbolic(_) => None,
        }
    }
}

impl Display for MathExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MathExpression::Textual(text) => write!(f, "{}", text),
            MathExpression::Symbolic(expr) => write!(f, "{}", expr.source),
        }
    }
}

/// Opaque handle to a MathML expression
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolicExpression {
    source: String,
}

impl SymbolicExpression {
    pub(crate) fn from_source(source: impl Into<String>) -> Self {
        SymbolicExpression {
            source: source.into(),
        }
    }

    /// Serialized MathML the expression was read from
    pub fn source(&self) -> &str {
        &self.source
    }
}
// endregion Math expressions

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_range() {
        assert!(Atoms::try_from(2000).is_err());
        assert!(Atoms::try_from(-1).is_err());
        assert_eq!(Atoms::try_from(1024).unwrap().get(), 1024);
        assert_eq!(Atoms::try_from(0).unwrap().get(), 0);
        assert_eq!(Atoms::default().get(), 0);
    }

    #[test]
    fn out_of_range_names_field() {
        let err = Atoms::checked("pos", 1025).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "pos",
                value: 1025.0,
                min: 0.0,
                max: 1024.0
            }
        );
    }

    #[test]
    fn row_and_weight_ranges() {
        assert!(Row::try_from(0).is_err());
        assert!(Row::try_from(1).is_ok());
        assert!(Row::try_from(256).is_ok());
        assert!(Row::try_from(257).is_err());
        assert!(Weight::try_from(16).is_ok());
        assert!(Weight::try_from(17).is_err());
    }

    #[test]
    fn edweight_range() {
        assert!(EdWeight::try_from(0.0).is_ok());
        assert!(EdWeight::try_from(1.0).is_ok());
        assert!(EdWeight::try_from(1.5).is_err());
        assert!(EdWeight::try_from(-0.1).is_err());
        assert!(EdWeight::try_from(f64::NAN).is_err());
        assert_eq!(EdWeight::default().get(), 1.0);
    }

    #[test]
    fn composed_weight() {
        let single = ComposedWeight::new("3");
        assert_eq!(single.weights().unwrap().unwrap(), vec![Weight(3)]);
        let pair = ComposedWeight::new("2 , 5");
        assert_eq!(pair.weights().unwrap().unwrap(), vec![Weight(2), Weight(5)]);
        assert!(ComposedWeight::new("20").weights().unwrap().is_err());
        assert!(ComposedWeight::new("a,b").weights().is_none());
    }

    #[test]
    fn enums_reject_unknown_values() {
        assert_eq!("emu".parse::<InputType>().unwrap(), InputType::Emu);
        let err = "unknown".parse::<InputType>().unwrap_err();
        match err {
            ValidationError::InvalidVariant { field, value, .. } => {
                assert_eq!(field, "type");
                assert_eq!(value, "unknown");
            }
            _ => panic!("Incorrect error"),
        }
        // Values are case sensitive
        assert!("Auto".parse::<GroupScale>().is_err());
        assert_eq!("DD".parse::<DatumType>().unwrap(), DatumType::DD);
        assert_eq!("full".parse::<SimulationType>().unwrap(), SimulationType::Full);
        assert!("isotopomer".parse::<SimulationMethod>().is_err());
        assert_eq!("xch".parse::<FluxValueType>().unwrap(), FluxValueType::Xch);
    }

    #[test]
    fn enum_display_matches_schema() {
        for value in InputType::VALUES {
            assert_eq!(value.parse::<InputType>().unwrap().to_string(), *value);
        }
        for value in DatumType::VALUES {
            assert_eq!(value.parse::<DatumType>().unwrap().to_string(), *value);
        }
    }

    #[test]
    fn math_expression_text() {
        let textual = MathExpression::Textual("v1 = 2".to_string());
        assert_eq!(textual.as_textual(), Some("v1 = 2"));
        let symbolic = MathExpression::Symbolic(SymbolicExpression::from_source("<math/>"));
        assert_eq!(symbolic.as_textual(), None);
        assert_eq!(symbolic.to_string(), "<math/>");
    }
}
