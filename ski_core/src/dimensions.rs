//! # Ski Dimensions
//!
//! Raw geometry of a single ski as catalogued by the manufacturer.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "length": 180.0,
//!   "tip": 145.0,
//!   "waist": 108.0,
//!   "tail": 135.0,
//!   "radius": 18.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Centimeters, Millimeters};

/// Immutable ski geometry handed to a surface equation.
///
/// No validation happens here. Each equation enforces the rules its
/// model needs and reports violations as [`crate::errors::CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkiDimensions {
    /// Overall length in centimeters
    #[serde(rename = "length")]
    pub length_cm: f64,

    /// Tip (shovel) width in millimeters
    #[serde(rename = "tip")]
    pub tip_mm: f64,

    /// Waist width in millimeters
    #[serde(rename = "waist")]
    pub waist_mm: f64,

    /// Tail width in millimeters
    #[serde(rename = "tail")]
    pub tail_mm: f64,

    /// Sidecut radius in meters. Carried for future models; no current
    /// equation reads it.
    #[serde(rename = "radius")]
    pub radius_m: f64,
}

impl SkiDimensions {
    /// Create dimensions from length (cm), tip/waist/tail (mm) and radius (m).
    ///
    /// ```rust
    /// use ski_core::SkiDimensions;
    ///
    /// let dims = SkiDimensions::new(180.0, 145.0, 108.0, 135.0, 18.0);
    /// assert_eq!(dims.waist_mm, 108.0);
    /// ```
    pub fn new(length_cm: f64, tip_mm: f64, waist_mm: f64, tail_mm: f64, radius_m: f64) -> Self {
        SkiDimensions {
            length_cm,
            tip_mm,
            waist_mm,
            tail_mm,
            radius_m,
        }
    }

    /// Mean of the three widths in millimeters
    pub fn average_width_mm(&self) -> f64 {
        (self.tip_mm + self.waist_mm + self.tail_mm) / 3.0
    }

    /// Tip, waist and tail widths converted to centimeters
    pub fn widths_cm(&self) -> WidthsCm {
        WidthsCm {
            tip: Centimeters::from(Millimeters(self.tip_mm)).0,
            waist: Centimeters::from(Millimeters(self.waist_mm)).0,
            tail: Centimeters::from(Millimeters(self.tail_mm)).0,
        }
    }
}

/// Widths in centimeters, as used by the integral model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthsCm {
    pub tip: f64,
    pub waist: f64,
    pub tail: f64,
}
