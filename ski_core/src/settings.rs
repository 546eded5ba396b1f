//! # Calculation Settings
//!
//! Selects the "current" surface algorithm and its parameters. This is a
//! deployment-wide choice: new records are computed with whatever these
//! settings build, while stored records keep the version that computed them.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "algorithm": "integral",
//!   "waist_position": 0.43,
//!   "tip_ratio": 0.15
//! }
//! ```
//!
//! Missing fields fall back to the defaults above.

use serde::{Deserialize, Serialize};

use crate::equations::integral::{DEFAULT_TIP_RATIO, DEFAULT_WAIST_POSITION};
use crate::equations::{Equation, EquationKind, IntegralEquation, SimpleEquation};
use crate::errors::CalcResult;

/// Algorithm selection and tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    /// Which model computes new records
    pub algorithm: EquationKind,

    /// Integral model: fraction of length from tail to waist
    pub waist_position: f64,

    /// Integral model: fraction of length taken by the tip
    pub tip_ratio: f64,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        CalculationSettings {
            algorithm: EquationKind::Integral,
            waist_position: DEFAULT_WAIST_POSITION,
            tip_ratio: DEFAULT_TIP_RATIO,
        }
    }
}

impl CalculationSettings {
    /// Default settings with a different algorithm
    pub fn with_algorithm(algorithm: EquationKind) -> Self {
        CalculationSettings {
            algorithm,
            ..CalculationSettings::default()
        }
    }

    /// Parse settings from JSON, filling gaps with defaults.
    ///
    /// ```rust
    /// use ski_core::settings::CalculationSettings;
    /// use ski_core::equations::EquationKind;
    ///
    /// let settings = CalculationSettings::from_json(r#"{"algorithm": "simple"}"#).unwrap();
    /// assert_eq!(settings.algorithm, EquationKind::Simple);
    /// assert_eq!(settings.tip_ratio, 0.15);
    /// ```
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the configured equation.
    ///
    /// # Errors
    ///
    /// `INVALID_CONSTRUCTOR_PARAMS` when the integral ratios are invalid.
    /// The ratios are not checked when the simple model is selected.
    pub fn build_equation(&self) -> CalcResult<Equation> {
        match self.algorithm {
            EquationKind::Simple => Ok(Equation::Simple(SimpleEquation)),
            EquationKind::Integral => {
                Ok(IntegralEquation::new(self.waist_position, self.tip_ratio)?.into())
            }
        }
    }
}
