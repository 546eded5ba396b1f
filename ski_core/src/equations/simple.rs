//! # Trapezoidal Surface Model (v1.0.0)
//!
//! Treats the ski as a band of constant width equal to the mean of its
//! tip, waist and tail widths.
//!
//! ## Formula
//!
//! ```text
//! w̄ = (tip + waist + tail) / 3          [mm]
//! A = round(length × w̄ / 10, 2)        [cm²]
//! ρ = round(weight / A, 2)             [g/cm²]
//! ```
//!
//! Crude, but defined for any positive length and widths, and easy to
//! reproduce by hand when writing fixtures.

use serde_json::json;

use super::{round_to, CalculationResult, SurfaceEquation, RESULT_DECIMALS};
use crate::dimensions::SkiDimensions;
use crate::errors::{CalcError, CalcResult};

/// Version tag of the trapezoidal model
pub const ALGORITHM_VERSION: &str = "1.0.0";

/// Baseline trapezoidal approximation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleEquation;

impl SurfaceEquation for SimpleEquation {
    fn calculate(&self, dimensions: &SkiDimensions, weight_g: f64) -> CalcResult<CalculationResult> {
        let avg_width_mm = dimensions.average_width_mm();
        let surface_area = round_to(dimensions.length_cm * avg_width_mm / 10.0, RESULT_DECIMALS);

        if !surface_area.is_finite() || surface_area <= 0.0 {
            return Err(CalcError::invalid_surface_area(
                surface_area,
                json!({
                    "weight": weight_g,
                    "dimensions": dimensions,
                }),
            ));
        }

        let result = CalculationResult::from_rounded_area(surface_area, weight_g);

        #[cfg(feature = "logging")]
        tracing::debug!(
            version = ALGORITHM_VERSION,
            avg_width_mm,
            surface_area = result.surface_area,
            relative_weight = result.relative_weight,
            "simple surface calculated"
        );

        Ok(result)
    }

    fn algorithm_version(&self) -> &'static str {
        ALGORITHM_VERSION
    }

    fn name(&self) -> &'static str {
        "Trapezoidal approximation"
    }
}
