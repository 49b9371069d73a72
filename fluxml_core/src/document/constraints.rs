//! This module provides the Constraints record holding flux and pool size constraints
use serde::Serialize;

use super::types::MathExpression;

/// Constraints on net fluxes, exchange fluxes and pool sizes
///
/// Appears once at document level (global) and optionally inside each configuration, where it
/// overrides the global constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraints {
    /// Net flux constraints
    pub net: Option<MathExpression>,
    /// Exchange flux constraints
    pub xch: Option<MathExpression>,
    /// Pool size constraints
    pub psize: Option<MathExpression>,
}

impl Constraints {
    /// Whether no constraint is set at all
    pub fn is_empty(&self) -> bool {
        self.net.is_none() && self.xch.is_none() && self.psize.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_constraints() {
        assert!(Constraints::default().is_empty());
        let constraints = Constraints {
            psize: Some(MathExpression::Textual("Glc >= 0".to_string())),
            ..Default::default()
        };
        assert!(!constraints.is_empty());
    }
}
