//! Property-based tests using proptest.
//!
//! Realistic ski geometry: 100-220 cm long, 60-160 mm wide, 500-3000 g.
//! Step sizes are large enough that a strict increase survives rounding to
//! 2 decimals.

use proptest::prelude::*;
use ski_core::equations::{Equation, EquationKind, SurfaceEquation, ALL_EQUATIONS};
use ski_core::SkiDimensions;

fn has_two_decimals(value: f64) -> bool {
    (value * 100.0).round() / 100.0 == value
}

fn equation_kind() -> impl Strategy<Value = EquationKind> {
    prop_oneof![Just(EquationKind::Simple), Just(EquationKind::Integral)]
}

prop_compose! {
    fn ski()(
        length in 100.0_f64..220.0,
        tip in 60.0_f64..160.0,
        waist in 60.0_f64..160.0,
        tail in 60.0_f64..160.0,
        radius in 10.0_f64..35.0,
    ) -> SkiDimensions {
        SkiDimensions::new(length, tip, waist, tail, radius)
    }
}

// --- Positivity and rounding ---

proptest! {
    #[test]
    fn outputs_positive_and_rounded(kind in equation_kind(), dims in ski(), weight in 500.0_f64..3000.0) {
        let result = Equation::from_kind(kind).calculate(&dims, weight).unwrap();
        prop_assert!(result.surface_area > 0.0);
        prop_assert!(result.relative_weight > 0.0);
        prop_assert!(has_two_decimals(result.surface_area), "area {}", result.surface_area);
        prop_assert!(has_two_decimals(result.relative_weight), "weight {}", result.relative_weight);
    }

    /// Relative weight is reconstructed exactly from the returned (rounded) area.
    #[test]
    fn relative_weight_from_rounded_area(kind in equation_kind(), dims in ski(), weight in 500.0_f64..3000.0) {
        let result = Equation::from_kind(kind).calculate(&dims, weight).unwrap();
        let expected = (weight / result.surface_area * 100.0).round() / 100.0;
        prop_assert_eq!(result.relative_weight, expected);
    }
}

// --- Monotonicity ---

proptest! {
    #[test]
    fn longer_ski_has_more_area(kind in equation_kind(), dims in ski(), extra in 1.0_f64..30.0) {
        let equation = Equation::from_kind(kind);
        let longer = SkiDimensions { length_cm: dims.length_cm + extra, ..dims };
        let base = equation.calculate(&dims, 1500.0).unwrap();
        let grown = equation.calculate(&longer, 1500.0).unwrap();
        prop_assert!(grown.surface_area > base.surface_area);
    }

    #[test]
    fn wider_ski_has_more_area(
        kind in equation_kind(),
        dims in ski(),
        which in 0usize..3,
        extra in 1.0_f64..20.0,
    ) {
        let equation = Equation::from_kind(kind);
        let mut wider = dims;
        match which {
            0 => wider.tip_mm += extra,
            1 => wider.waist_mm += extra,
            _ => wider.tail_mm += extra,
        }
        let base = equation.calculate(&dims, 1500.0).unwrap();
        let grown = equation.calculate(&wider, 1500.0).unwrap();
        prop_assert!(grown.surface_area > base.surface_area);
    }

    #[test]
    fn heavier_ski_has_more_relative_weight(
        kind in equation_kind(),
        dims in ski(),
        weight in 500.0_f64..2500.0,
        extra in 200.0_f64..500.0,
    ) {
        let equation = Equation::from_kind(kind);
        let light = equation.calculate(&dims, weight).unwrap();
        let heavy = equation.calculate(&dims, weight + extra).unwrap();
        prop_assert!(heavy.relative_weight > light.relative_weight);
        prop_assert_eq!(heavy.surface_area, light.surface_area);
    }

    #[test]
    fn radius_never_affects_result(kind in equation_kind(), dims in ski(), radius in 5.0_f64..50.0) {
        let equation = Equation::from_kind(kind);
        let other = SkiDimensions { radius_m: radius, ..dims };
        prop_assert_eq!(equation.calculate(&dims, 1500.0).unwrap(), equation.calculate(&other, 1500.0).unwrap());
    }
}

// --- Versions ---

#[test]
fn versions_constant_and_distinct() {
    let versions: Vec<_> = ALL_EQUATIONS
        .iter()
        .map(|kind| Equation::from_kind(*kind).algorithm_version())
        .collect();
    assert_eq!(versions, vec!["1.0.0", "2.0.0"]);
}
