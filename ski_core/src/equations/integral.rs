//! # Three-Section Integral Model (v2.0.0)
//!
//! Splits the ski into three sections along its length and integrates a
//! width profile over each one in closed form:
//!
//! ```text
//!   tail                waist                      tip start   tip
//!    ├──── l_back ────────┼──────── l_front ────────┼── l_tip ──┤
//!    quadratic            quadratic                 logarithmic
//! ```
//!
//! - **Back** (tail → waist): parabola from the tail width down to the
//!   waist width, flat at the waist.
//! - **Front** (waist → tip start): same shape, growing to the tip width.
//! - **Tip**: rounded shovel, modeled as logarithmic growth.
//!
//! ## Formulas
//!
//! Widths in cm (`w = mm / 10`), lengths in cm.
//!
//! ```text
//! l_back  = waistPosition × L
//! l_tip   = tipRatio × L
//! l_front = L − l_back − l_tip
//!
//! A_back  = (w_tail − w_waist) × l_back² / (6 × l_back) + w_waist × l_back / 2
//! A_front = (w_tip  − w_waist) × l_front² / (6 × l_front) + w_waist × l_front / 2
//!
//! d       = ln(l_tip + 1)
//! A_tip   = w_tip / (2d) × ((l_tip + 1) × d − l_tip)
//!
//! A       = 2 × (A_back + A_front + A_tip)
//! ```
//!
//! Each section term integrates the half-width, so the final factor of 2
//! yields the full plan area.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{round_to, CalculationResult, SurfaceEquation, RESULT_DECIMALS};
use crate::dimensions::SkiDimensions;
use crate::errors::{CalcError, CalcResult};

/// Version tag of the integral model
pub const ALGORITHM_VERSION: &str = "2.0.0";

/// Default fraction of length from tail to waist
pub const DEFAULT_WAIST_POSITION: f64 = 0.43;

/// Default fraction of length taken by the rounded tip
pub const DEFAULT_TIP_RATIO: f64 = 0.15;

/// Shortest tip section (cm) the logarithmic profile is evaluated for
pub const MIN_TIP_LENGTH_CM: f64 = 0.1;

/// Below this magnitude the tip log denominator is treated as zero
const LN_DENOMINATOR_EPSILON: f64 = 1e-10;

/// Lengths of the three model sections, in cm.
///
/// `l_back + l_front + l_tip` equals the ski length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionLengths {
    pub l_back: f64,
    pub l_front: f64,
    pub l_tip: f64,
}

impl SectionLengths {
    /// Sum of the three sections
    pub fn total(&self) -> f64 {
        self.l_back + self.l_front + self.l_tip
    }

    fn validate(&self) -> CalcResult<()> {
        let positive = |l: f64| l > 0.0;
        if !(positive(self.l_back) && positive(self.l_front) && positive(self.l_tip)) {
            return Err(CalcError::InvalidSectionLengths {
                l_back: self.l_back,
                l_front: self.l_front,
                l_tip: self.l_tip,
            });
        }
        if self.l_tip < MIN_TIP_LENGTH_CM {
            return Err(CalcError::InvalidTipLength {
                l_tip: self.l_tip,
                minimum: MIN_TIP_LENGTH_CM,
            });
        }
        Ok(())
    }
}

/// Three-section integral model.
///
/// The two ratios are validated once at construction; an instance that
/// exists is always usable.
///
/// ```rust
/// use ski_core::equations::{IntegralEquation, SurfaceEquation};
/// use ski_core::SkiDimensions;
///
/// let equation = IntegralEquation::default();
/// let dims = SkiDimensions::new(180.0, 145.0, 108.0, 135.0, 18.0);
/// let result = equation.calculate(&dims, 1850.0).unwrap();
/// assert!((result.surface_area - 2103.8).abs() < 0.1);
///
/// assert!(IntegralEquation::new(0.5, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegralEquation {
    waist_position: f64,
    tip_ratio: f64,
}

impl IntegralEquation {
    /// Create a model with custom section ratios.
    ///
    /// # Errors
    ///
    /// `INVALID_CONSTRUCTOR_PARAMS` unless both ratios lie in (0, 1) and
    /// their sum is below 1, leaving room for the front section.
    pub fn new(waist_position: f64, tip_ratio: f64) -> CalcResult<Self> {
        let in_unit_interval = |v: f64| v > 0.0 && v < 1.0;
        let valid = in_unit_interval(waist_position)
            && in_unit_interval(tip_ratio)
            && waist_position + tip_ratio < 1.0;

        if !valid {
            return Err(CalcError::InvalidConstructorParams {
                waist_position,
                tip_ratio,
            });
        }

        Ok(IntegralEquation {
            waist_position,
            tip_ratio,
        })
    }

    /// Fraction of length from tail to waist
    pub fn waist_position(&self) -> f64 {
        self.waist_position
    }

    /// Fraction of length taken by the tip
    pub fn tip_ratio(&self) -> f64 {
        self.tip_ratio
    }

    /// Split a ski length (cm) into back, front and tip sections.
    ///
    /// No validation; see [`SurfaceEquation::calculate`] for the rules.
    pub fn section_lengths(&self, length_cm: f64) -> SectionLengths {
        let l_back = self.waist_position * length_cm;
        let l_tip = self.tip_ratio * length_cm;
        let l_front = length_cm - l_back - l_tip;
        SectionLengths { l_back, l_front, l_tip }
    }
}

impl Default for IntegralEquation {
    fn default() -> Self {
        IntegralEquation {
            waist_position: DEFAULT_WAIST_POSITION,
            tip_ratio: DEFAULT_TIP_RATIO,
        }
    }
}

/// Half-width area of a parabolic section that is flat at the waist end.
fn parabolic_section_area(w_end: f64, w_waist: f64, length: f64) -> f64 {
    (w_end - w_waist) * (length * length) / (6.0 * length) + w_waist * length / 2.0
}

/// Half-width area of the logarithmic tip section.
fn tip_section_area(w_tip: f64, l_tip: f64) -> CalcResult<f64> {
    let ln_denominator = (l_tip + 1.0).ln();
    if ln_denominator.abs() < LN_DENOMINATOR_EPSILON {
        return Err(CalcError::InvalidTipCalculation { ln_denominator });
    }

    let coefficient = w_tip / (2.0 * ln_denominator);
    let integral_value = (l_tip + 1.0) * ln_denominator - l_tip;
    Ok(coefficient * integral_value)
}

impl SurfaceEquation for IntegralEquation {
    fn calculate(&self, dimensions: &SkiDimensions, weight_g: f64) -> CalcResult<CalculationResult> {
        let sections = self.section_lengths(dimensions.length_cm);
        sections.validate()?;

        let widths = dimensions.widths_cm();

        let a_back = parabolic_section_area(widths.tail, widths.waist, sections.l_back);
        let a_front = parabolic_section_area(widths.tip, widths.waist, sections.l_front);
        let a_tip = tip_section_area(widths.tip, sections.l_tip)?;

        let raw_area = 2.0 * (a_back + a_front + a_tip);
        let surface_area = round_to(raw_area, RESULT_DECIMALS);

        // Rounding can push a valid raw area to zero (tiny skis) or infinity (huge ones).
        let usable = |area: f64| area.is_finite() && area > 0.0;
        if !usable(raw_area) || !usable(surface_area) {
            return Err(CalcError::invalid_surface_area(
                raw_area,
                json!({
                    "widths_cm": widths,
                    "sections": sections,
                }),
            ));
        }

        let result = CalculationResult::from_rounded_area(surface_area, weight_g);

        #[cfg(feature = "logging")]
        tracing::debug!(
            version = ALGORITHM_VERSION,
            l_back = sections.l_back,
            l_front = sections.l_front,
            l_tip = sections.l_tip,
            a_back,
            a_front,
            a_tip,
            surface_area = result.surface_area,
            relative_weight = result.relative_weight,
            "integral surface calculated"
        );

        Ok(result)
    }

    fn algorithm_version(&self) -> &'static str {
        ALGORITHM_VERSION
    }

    fn name(&self) -> &'static str {
        "Three-section integral"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_ski() -> SkiDimensions {
        SkiDimensions::new(180.0, 145.0, 108.0, 135.0, 18.0)
    }

    #[test]
    fn test_default_ratios() {
        let eq = IntegralEquation::default();
        assert_eq!(eq.waist_position(), 0.43);
        assert_eq!(eq.tip_ratio(), 0.15);
        assert_eq!(IntegralEquation::new(0.43, 0.15).unwrap(), eq);
    }

    #[test]
    fn test_section_lengths_sum_to_length() {
        let sections = IntegralEquation::default().section_lengths(180.0);
        assert!((sections.l_back - 77.4).abs() < 1e-9);
        assert!((sections.l_tip - 27.0).abs() < 1e-9);
        assert!((sections.l_front - 75.6).abs() < 1e-9);
        assert!((sections.total() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_section_areas() {
        // Back: (13.5 − 10.8) × 77.4 / 6 + 10.8 × 77.4 / 2 = 0.45·77.4 + 417.96
        let a_back = parabolic_section_area(13.5, 10.8, 77.4);
        assert!((a_back - 452.79).abs() < 1e-6);

        let a_tip = tip_section_area(14.5, 27.0).unwrap();
        assert!((a_tip - 144.2551).abs() < 1e-3);
    }

    #[test]
    fn test_reference_freeride_ski() {
        let result = IntegralEquation::default()
            .calculate(&reference_ski(), 1850.0)
            .unwrap();
        assert!((result.surface_area - 2103.8).abs() < 0.1);
        assert_eq!(result.surface_area, 2103.81);
        assert_eq!(result.relative_weight, 0.88);
    }

    #[test]
    fn test_differs_from_trapezoid() {
        use crate::equations::SimpleEquation;

        let dims = reference_ski();
        let integral = IntegralEquation::default().calculate(&dims, 1850.0).unwrap();
        let simple = SimpleEquation.calculate(&dims, 1850.0).unwrap();
        assert_ne!(integral.surface_area, simple.surface_area);
    }

    #[test]
    fn test_constructor_sum_equals_one() {
        let err = IntegralEquation::new(0.5, 0.5).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONSTRUCTOR_PARAMS");
    }

    #[test]
    fn test_constructor_context() {
        let err = IntegralEquation::new(0.6, 0.5).unwrap_err();
        assert_eq!(
            err,
            CalcError::InvalidConstructorParams {
                waist_position: 0.6,
                tip_ratio: 0.5
            }
        );
        let ctx = err.context();
        assert_eq!(ctx["waistPosition"], 0.6);
        assert_eq!(ctx["tipRatio"], 0.5);
    }

    #[test]
    fn test_constructor_bounds() {
        assert!(IntegralEquation::new(0.0, 0.15).is_err());
        assert!(IntegralEquation::new(1.0, 0.15).is_err());
        assert!(IntegralEquation::new(0.43, 0.0).is_err());
        assert!(IntegralEquation::new(0.43, -0.1).is_err());
        assert!(IntegralEquation::new(f64::NAN, 0.15).is_err());
        assert!(IntegralEquation::new(0.5, 0.49).is_ok());
    }

    #[test]
    fn test_zero_length() {
        let dims = SkiDimensions::new(0.0, 145.0, 108.0, 135.0, 18.0);
        let err = IntegralEquation::default().calculate(&dims, 1850.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION_LENGTHS");
        assert_eq!(err.context()["l_tip"], 0.0);
    }

    #[test]
    fn test_negative_length() {
        let dims = SkiDimensions::new(-180.0, 145.0, 108.0, 135.0, 18.0);
        let err = IntegralEquation::default().calculate(&dims, 1850.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION_LENGTHS");
    }

    #[test]
    fn test_tip_too_short() {
        // 0.15 × 0.5 = 0.075 cm of tip
        let dims = SkiDimensions::new(0.5, 145.0, 108.0, 135.0, 18.0);
        let err = IntegralEquation::default().calculate(&dims, 1850.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TIP_LENGTH");
        match err {
            CalcError::InvalidTipLength { l_tip, minimum } => {
                assert!((l_tip - 0.075).abs() < 1e-12);
                assert_eq!(minimum, MIN_TIP_LENGTH_CM);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_log_denominator() {
        let err = tip_section_area(14.5, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TIP_CALCULATION");
    }

    #[test]
    fn test_negative_widths_fail_surface_check() {
        let dims = SkiDimensions::new(180.0, -145.0, -108.0, -135.0, 18.0);
        let err = IntegralEquation::default().calculate(&dims, 1850.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SURFACE_AREA");
        assert!(err.context().get("sections").is_some());
        assert!(err.context().get("widths_cm").is_some());
    }

    #[test]
    fn test_infinite_tip_rejected() {
        let dims = SkiDimensions::new(180.0, f64::INFINITY, 108.0, 135.0, 18.0);
        let err = IntegralEquation::default().calculate(&dims, 1850.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SURFACE_AREA");
    }

    #[test]
    fn test_infinite_length_rejected() {
        // inf − inf leaves the front section undefined
        let dims = SkiDimensions::new(f64::INFINITY, 145.0, 108.0, 135.0, 18.0);
        let err = IntegralEquation::default().calculate(&dims, 1850.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION_LENGTHS");
    }

    #[test]
    fn test_area_overflowing_rounding_rejected() {
        let dims = SkiDimensions::new(1e306, 145.0, 108.0, 135.0, 18.0);
        let err = IntegralEquation::default().calculate(&dims, 1850.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SURFACE_AREA");
        // Raw area is still finite; only the rounded figure overflowed
        assert!(err.context()["surface_area"].as_f64().is_some());
    }

    #[test]
    fn test_custom_ratios_change_result() {
        let dims = reference_ski();
        let default = IntegralEquation::default().calculate(&dims, 1850.0).unwrap();
        let custom = IntegralEquation::new(0.40, 0.20)
            .unwrap()
            .calculate(&dims, 1850.0)
            .unwrap();
        assert_ne!(default.surface_area, custom.surface_area);
    }

    #[test]
    fn test_version() {
        assert_eq!(IntegralEquation::default().algorithm_version(), "2.0.0");
    }
}
