//! # Surface Equations
//!
//! Geometric models that turn raw ski dimensions and a weight into a
//! surface area and a weight-per-area figure. Each model reports a fixed
//! semantic version so stored results can always be traced back to the
//! algorithm that produced them.
//!
//! ## Modules
//!
//! - [`simple`] - Trapezoidal approximation (v1.0.0)
//! - [`integral`] - Three-section integral model (v2.0.0)
//! - [`registry`] - Algorithm metadata for listings and reports
//!
//! ## Rounding
//!
//! Surface area is rounded to 2 decimals first. Relative weight is then
//! computed from the *rounded* area and rounded to 2 decimals. Stored
//! results depend on this order.
//!
//! ## Example
//!
//! ```rust
//! use ski_core::equations::{Equation, EquationKind, SurfaceEquation};
//! use ski_core::SkiDimensions;
//!
//! let dims = SkiDimensions::new(180.0, 130.0, 100.0, 120.0, 17.0);
//! let equation = Equation::from_kind(EquationKind::Simple);
//! let result = equation.calculate(&dims, 1200.0).unwrap();
//!
//! assert_eq!(result.surface_area, 2100.0);
//! assert_eq!(result.relative_weight, 0.57);
//! assert_eq!(equation.algorithm_version(), "1.0.0");
//! ```

pub mod integral;
pub mod registry;
pub mod simple;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dimensions::SkiDimensions;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Grams, SquareCentimeters};

pub use integral::{IntegralEquation, SectionLengths};
pub use registry::{EquationMetadata, ALL_EQUATIONS};
pub use simple::SimpleEquation;

/// Decimal places kept for both derived figures
pub const RESULT_DECIMALS: i32 = 2;

/// Derived figures for one ski.
///
/// ## JSON Example
///
/// ```json
/// {
///   "surface_area": 2318.8,
///   "relative_weight": 0.78
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Surface area in cm², rounded to 2 decimals
    pub surface_area: f64,

    /// Weight per area in g/cm², from the rounded area, rounded to 2 decimals
    pub relative_weight: f64,
}

impl CalculationResult {
    /// Build a result from an already-rounded surface area.
    pub(crate) fn from_rounded_area(surface_area: f64, weight_g: f64) -> Self {
        let density = Grams(weight_g) / SquareCentimeters(surface_area);
        CalculationResult {
            surface_area,
            relative_weight: round_to(density.0, RESULT_DECIMALS),
        }
    }
}

/// A geometric model for ski surface area.
///
/// Implementations are pure: no I/O, no interior mutability. Any number of
/// threads may share one instance.
pub trait SurfaceEquation: Send + Sync {
    /// Compute surface area and relative weight for one ski.
    ///
    /// # Errors
    ///
    /// Returns the business error describing which geometric rule the
    /// input violates, with the offending values attached.
    fn calculate(&self, dimensions: &SkiDimensions, weight_g: f64) -> CalcResult<CalculationResult>;

    /// Semantic version of the algorithm (`MAJOR.MINOR.PATCH`)
    fn algorithm_version(&self) -> &'static str;

    /// Short human-readable model name
    fn name(&self) -> &'static str;
}

/// Round half away from zero to `decimals` places.
///
/// ```rust
/// use ski_core::equations::round_to;
///
/// assert_eq!(round_to(0.7762, 2), 0.78);
/// assert_eq!(round_to(2103.8102, 2), 2103.81);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Recognized algorithm names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquationKind {
    /// Trapezoidal approximation
    Simple,
    /// Three-section integral model
    Integral,
}

impl EquationKind {
    /// Name used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            EquationKind::Simple => "simple",
            EquationKind::Integral => "integral",
        }
    }

    /// Version reported by this kind's implementation
    pub fn algorithm_version(&self) -> &'static str {
        match self {
            EquationKind::Simple => simple::ALGORITHM_VERSION,
            EquationKind::Integral => integral::ALGORITHM_VERSION,
        }
    }
}

impl fmt::Display for EquationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EquationKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(EquationKind::Simple),
            "integral" => Ok(EquationKind::Integral),
            _ => Err(CalcError::unknown_algorithm(s)),
        }
    }
}

/// Tagged union over the shipped models.
///
/// This is what callers hold when the algorithm is chosen at runtime.
/// Dispatch is a plain `match`, so adding a model forces every call site
/// to be revisited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Equation {
    Simple(SimpleEquation),
    Integral(IntegralEquation),
}

impl Equation {
    /// Build the default-configured equation for `kind`.
    pub fn from_kind(kind: EquationKind) -> Self {
        match kind {
            EquationKind::Simple => Equation::Simple(SimpleEquation),
            EquationKind::Integral => Equation::Integral(IntegralEquation::default()),
        }
    }

    /// The algorithm new records are computed with.
    pub fn current() -> Self {
        Equation::from_kind(EquationKind::Integral)
    }

    /// Which kind this equation is
    pub fn kind(&self) -> EquationKind {
        match self {
            Equation::Simple(_) => EquationKind::Simple,
            Equation::Integral(_) => EquationKind::Integral,
        }
    }
}

impl Default for Equation {
    fn default() -> Self {
        Equation::current()
    }
}

impl SurfaceEquation for Equation {
    fn calculate(&self, dimensions: &SkiDimensions, weight_g: f64) -> CalcResult<CalculationResult> {
        match self {
            Equation::Simple(eq) => eq.calculate(dimensions, weight_g),
            Equation::Integral(eq) => eq.calculate(dimensions, weight_g),
        }
    }

    fn algorithm_version(&self) -> &'static str {
        match self {
            Equation::Simple(eq) => eq.algorithm_version(),
            Equation::Integral(eq) => eq.algorithm_version(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Equation::Simple(eq) => eq.name(),
            Equation::Integral(eq) => eq.name(),
        }
    }
}

impl From<SimpleEquation> for Equation {
    fn from(eq: SimpleEquation) -> Self {
        Equation::Simple(eq)
    }
}

impl From<IntegralEquation> for Equation {
    fn from(eq: IntegralEquation) -> Self {
        Equation::Integral(eq)
    }
}
