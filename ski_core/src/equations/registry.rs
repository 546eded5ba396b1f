//! # Algorithm Registry
//!
//! Static metadata for every shipped surface model: display name, version,
//! formula summary and a short description. Used for listings, reports and
//! audit trails of stored results.
//!
//! ## Usage
//!
//! ```rust
//! use ski_core::equations::{EquationKind, ALL_EQUATIONS};
//!
//! let meta = EquationKind::Integral.metadata();
//! assert_eq!(meta.version, "2.0.0");
//! assert_eq!(ALL_EQUATIONS.len(), 2);
//! ```

use serde::Serialize;

use super::{integral, simple, EquationKind};

/// Every model the crate ships, oldest first
pub const ALL_EQUATIONS: &[EquationKind] = &[EquationKind::Simple, EquationKind::Integral];

/// Descriptive metadata for a surface model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquationMetadata {
    /// Kind used to select the model
    pub kind: EquationKind,

    /// Display name
    pub name: &'static str,

    /// Semantic version stamped on results
    pub version: &'static str,

    /// Plain-text formula summary
    pub formula: &'static str,

    /// What the model assumes about ski shape
    pub description: &'static str,
}

impl EquationKind {
    /// Registry entry for this kind
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            EquationKind::Simple => EquationMetadata {
                kind: *self,
                name: "Trapezoidal approximation",
                version: simple::ALGORITHM_VERSION,
                formula: "A = L × (tip + waist + tail) / 3 / 10",
                description: "Constant-width band at the mean of tip, waist and tail widths.",
            },
            EquationKind::Integral => EquationMetadata {
                kind: *self,
                name: "Three-section integral",
                version: integral::ALGORITHM_VERSION,
                formula: "A = 2 × (A_back + A_front + A_tip)",
                description: "Quadratic back and front sections meeting at the waist, \
                              with a logarithmic rounded tip.",
            },
        }
    }
}

/// Markdown table of all registered models
pub fn generate_equations_markdown() -> String {
    let mut out = String::from("| Algorithm | Version | Formula | Description |\n");
    out.push_str("|---|---|---|---|\n");
    for kind in ALL_EQUATIONS {
        let meta = kind.metadata();
        out.push_str(&format!(
            "| {} (`{}`) | {} | `{}` | {} |\n",
            meta.name, meta.kind, meta.version, meta.formula, meta.description
        ));
    }
    out
}
