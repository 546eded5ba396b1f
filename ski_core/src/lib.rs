//! # ski_core - Ski Surface Calculation Engine
//!
//! `ski_core` derives surface area and weight-per-area from the raw geometry
//! of a ski, using versioned geometric models. All inputs and outputs are
//! JSON-serializable, and every derived figure can be stamped with the
//! version of the algorithm that produced it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Equations are pure; instances can be shared across threads
//! - **Versioned**: Each model reports a fixed `MAJOR.MINOR.PATCH` tag
//! - **Rich Errors**: Business errors carry a code and the offending values
//!
//! ## Quick Start
//!
//! ```rust
//! use ski_core::equations::{Equation, SurfaceEquation};
//! use ski_core::SkiDimensions;
//!
//! let dims = SkiDimensions::new(180.0, 145.0, 108.0, 135.0, 18.0);
//! let equation = Equation::current();
//!
//! let result = equation.calculate(&dims, 1850.0).unwrap();
//! assert_eq!(result.surface_area, 2103.81);
//! assert_eq!(equation.algorithm_version(), "2.0.0");
//!
//! let json = serde_json::to_string(&result).unwrap();
//! assert!(json.contains("relative_weight"));
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Surface models (trapezoidal v1.0.0, integral v2.0.0)
//! - [`versioning`] - Version tags, stamped metrics and recalculation policy
//! - [`dimensions`] - Ski geometry input type
//! - [`settings`] - Algorithm selection
//! - [`catalog`] - In-memory record collection with notes and comparison
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod dimensions;
pub mod equations;
pub mod errors;
pub mod settings;
pub mod units;
pub mod versioning;

// Re-export commonly used types at crate root for convenience
pub use catalog::{Catalog, SkiSpec};
pub use dimensions::SkiDimensions;
pub use equations::{CalculationResult, Equation, EquationKind, SurfaceEquation};
pub use errors::{CalcError, CalcResult};
pub use settings::CalculationSettings;
pub use versioning::{AlgorithmVersion, ComputedMetrics, RecalculationPolicy};
