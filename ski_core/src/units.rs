//! # Unit Types
//!
//! Lightweight `f64` newtypes for the units used when describing a ski.
//! They serialize as bare numbers so JSON stays clean.
//!
//! ## Conventions
//!
//! Ski specifications mix units by tradition:
//! - Length: centimeters (cm)
//! - Tip/waist/tail widths: millimeters (mm)
//! - Sidecut radius: meters (m), carried as a plain `f64` since nothing converts it
//! - Weight: grams (g), per ski
//! - Surface area: square centimeters (cm²)
//! - Relative weight: grams per square centimeter (g/cm²)
//!
//! ## Example
//!
//! ```rust
//! use ski_core::units::{Centimeters, Millimeters};
//!
//! let waist = Millimeters(108.0);
//! let waist_cm: Centimeters = waist.into();
//! assert!((waist_cm.0 - 10.8).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Centimeters {
    fn from(mm: Millimeters) -> Self {
        Centimeters(mm.0 / 10.0)
    }
}

// ============================================================================
// Mass, Area and Areal Density
// ============================================================================

/// Mass in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

/// Area in square centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareCentimeters(pub f64);

/// Areal density in grams per square centimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GramsPerSquareCentimeter(pub f64);

impl std::ops::Div<SquareCentimeters> for Grams {
    type Output = GramsPerSquareCentimeter;

    fn div(self, area: SquareCentimeters) -> GramsPerSquareCentimeter {
        GramsPerSquareCentimeter(self.0 / area.0)
    }
}
