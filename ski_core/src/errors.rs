//! # Error Types
//!
//! Structured error types for ski_core. Every geometric failure is a
//! business-rule violation carrying the numeric values that triggered it,
//! so a failing computation can be reconstructed from the error alone.
//!
//! ## Example
//!
//! ```rust
//! use ski_core::errors::{CalcError, CalcResult};
//!
//! fn check_weight(weight_g: f64) -> CalcResult<()> {
//!     if weight_g <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "weight",
//!             weight_g.to_string(),
//!             "Weight must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias for ski_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for surface calculations and record handling.
///
/// The first five variants map one-to-one onto the business codes reported
/// by the equations. The rest cover configuration and catalog handling.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Integral model ratios outside (0, 1) or summing to 1 or more
    #[error("Invalid constructor parameters: waistPosition={waist_position}, tipRatio={tip_ratio}")]
    InvalidConstructorParams { waist_position: f64, tip_ratio: f64 },

    /// A derived section length is zero or negative
    #[error("Invalid section lengths: back={l_back}, front={l_front}, tip={l_tip}")]
    InvalidSectionLengths { l_back: f64, l_front: f64, l_tip: f64 },

    /// Tip section too short for the logarithmic profile
    #[error("Invalid tip length: {l_tip} cm (minimum {minimum} cm)")]
    InvalidTipLength { l_tip: f64, minimum: f64 },

    /// Logarithm denominator of the tip profile is degenerate
    #[error("Invalid tip calculation: ln denominator {ln_denominator} too close to zero")]
    InvalidTipCalculation { ln_denominator: f64 },

    /// Computed surface area is not positive
    #[error("Invalid surface area: {surface_area} cm²")]
    InvalidSurfaceArea {
        surface_area: f64,
        /// Remaining values needed to reproduce the failure
        context: Value,
    },

    /// A caller-supplied value is malformed
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Algorithm name not recognized
    #[error("Unknown algorithm: '{name}' (expected one of: simple, integral)")]
    UnknownAlgorithm { name: String },

    /// Algorithm version tag is not MAJOR.MINOR.PATCH
    #[error("Invalid algorithm version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Catalog lookup failed
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidSurfaceArea error with its diagnostic context
    pub fn invalid_surface_area(surface_area: f64, context: Value) -> Self {
        CalcError::InvalidSurfaceArea { surface_area, context }
    }

    /// Create an UnknownAlgorithm error
    pub fn unknown_algorithm(name: impl Into<String>) -> Self {
        CalcError::UnknownAlgorithm { name: name.into() }
    }

    /// Create an InvalidVersion error
    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create a RecordNotFound error
    pub fn record_not_found(id: impl ToString) -> Self {
        CalcError::RecordNotFound { id: id.to_string() }
    }

    /// Whether retrying the same operation could succeed.
    ///
    /// Always false: every failure here is a deterministic function of the input.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidConstructorParams { .. } => "INVALID_CONSTRUCTOR_PARAMS",
            CalcError::InvalidSectionLengths { .. } => "INVALID_SECTION_LENGTHS",
            CalcError::InvalidTipLength { .. } => "INVALID_TIP_LENGTH",
            CalcError::InvalidTipCalculation { .. } => "INVALID_TIP_CALCULATION",
            CalcError::InvalidSurfaceArea { .. } => "INVALID_SURFACE_AREA",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownAlgorithm { .. } => "UNKNOWN_ALGORITHM",
            CalcError::InvalidVersion { .. } => "INVALID_VERSION",
            CalcError::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// Offending values as a JSON object, keyed the way the boundary reports them.
    pub fn context(&self) -> Value {
        match self {
            CalcError::InvalidConstructorParams { waist_position, tip_ratio } => json!({
                "waistPosition": waist_position,
                "tipRatio": tip_ratio,
            }),
            CalcError::InvalidSectionLengths { l_back, l_front, l_tip } => json!({
                "l_back": l_back,
                "l_front": l_front,
                "l_tip": l_tip,
            }),
            CalcError::InvalidTipLength { l_tip, minimum } => json!({
                "l_tip": l_tip,
                "minimum": minimum,
            }),
            CalcError::InvalidTipCalculation { ln_denominator } => json!({
                "lnDenominator": ln_denominator,
            }),
            CalcError::InvalidSurfaceArea { surface_area, context } => {
                let mut merged = json!({ "surface_area": surface_area });
                if let (Some(target), Some(extra)) = (merged.as_object_mut(), context.as_object()) {
                    for (key, value) in extra {
                        target.insert(key.clone(), value.clone());
                    }
                }
                merged
            }
            CalcError::InvalidInput { field, value, .. } => json!({ "field": field, "value": value }),
            CalcError::UnknownAlgorithm { name } => json!({ "name": name }),
            CalcError::InvalidVersion { version, .. } => json!({ "version": version }),
            CalcError::RecordNotFound { id } => json!({ "id": id }),
            CalcError::SerializationError { .. } => json!({}),
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: err.to_string() }
    }
}
