//! # Algorithm Versioning
//!
//! Every stored result carries the version of the algorithm that produced
//! it. When the current algorithm changes, old records stay self-describing
//! and can be recalculated selectively instead of being silently
//! reinterpreted.
//!
//! ## Example
//!
//! ```rust
//! use ski_core::equations::{Equation, EquationKind};
//! use ski_core::versioning::{ComputedMetrics, RecalculationPolicy};
//! use ski_core::SkiDimensions;
//!
//! let dims = SkiDimensions::new(186.0, 140.0, 106.0, 128.0, 21.0);
//! let old = ComputedMetrics::compute(&Equation::from_kind(EquationKind::Simple), &dims, 1800.0).unwrap();
//! assert_eq!(old.algorithm_version.to_string(), "1.0.0");
//!
//! let policy = RecalculationPolicy::new(Equation::current()).unwrap();
//! assert!(policy.needs_recalculation(Some(&old)));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dimensions::SkiDimensions;
use crate::equations::{CalculationResult, Equation, SurfaceEquation};
use crate::errors::{CalcError, CalcResult};

/// A plain `MAJOR.MINOR.PATCH` version tag.
///
/// Pre-release and build metadata are rejected; algorithm versions are
/// release identifiers only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlgorithmVersion(semver::Version);

impl AlgorithmVersion {
    /// Parse and validate a version tag.
    pub fn parse(version: &str) -> CalcResult<Self> {
        let parsed = semver::Version::parse(version)
            .map_err(|e| CalcError::invalid_version(version, e.to_string()))?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(CalcError::invalid_version(
                version,
                "pre-release and build metadata are not allowed",
            ));
        }

        Ok(AlgorithmVersion(parsed))
    }

    /// Version reported by `equation`.
    pub fn of(equation: &dyn SurfaceEquation) -> CalcResult<Self> {
        AlgorithmVersion::parse(equation.algorithm_version())
    }

    /// Major component; a bump means results are not comparable
    pub fn major(&self) -> u64 {
        self.0.major
    }
}

impl fmt::Display for AlgorithmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlgorithmVersion {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmVersion::parse(s)
    }
}

impl TryFrom<String> for AlgorithmVersion {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AlgorithmVersion::parse(&value)
    }
}

impl From<AlgorithmVersion> for String {
    fn from(version: AlgorithmVersion) -> Self {
        version.to_string()
    }
}

/// Derived figures stamped with the version that computed them.
///
/// ## JSON Example
///
/// ```json
/// {
///   "surface_area": 2103.81,
///   "relative_weight": 0.88,
///   "algorithm_version": "2.0.0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedMetrics {
    /// Surface area in cm²
    pub surface_area: f64,

    /// Weight per area in g/cm²
    pub relative_weight: f64,

    /// Version of the algorithm that produced the two figures
    pub algorithm_version: AlgorithmVersion,
}

impl ComputedMetrics {
    /// Run `equation` and stamp the result with its version.
    pub fn compute(equation: &dyn SurfaceEquation, dimensions: &SkiDimensions, weight_g: f64) -> CalcResult<Self> {
        let version = AlgorithmVersion::of(equation)?;
        let result = equation.calculate(dimensions, weight_g)?;
        Ok(ComputedMetrics::stamp(result, version))
    }

    /// Attach a version to an existing result
    pub fn stamp(result: CalculationResult, algorithm_version: AlgorithmVersion) -> Self {
        ComputedMetrics {
            surface_area: result.surface_area,
            relative_weight: result.relative_weight,
            algorithm_version,
        }
    }

    /// The unstamped figures
    pub fn result(&self) -> CalculationResult {
        CalculationResult {
            surface_area: self.surface_area,
            relative_weight: self.relative_weight,
        }
    }
}

/// Decides which stored results must be recomputed with the current algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct RecalculationPolicy {
    current: Equation,
    current_version: AlgorithmVersion,
}

impl RecalculationPolicy {
    /// Policy targeting `current` as the algorithm for new and refreshed records.
    pub fn new(current: Equation) -> CalcResult<Self> {
        let current_version = AlgorithmVersion::of(&current)?;
        Ok(RecalculationPolicy {
            current,
            current_version,
        })
    }

    /// The algorithm new records are computed with
    pub fn current(&self) -> &Equation {
        &self.current
    }

    /// Version of the current algorithm
    pub fn current_version(&self) -> &AlgorithmVersion {
        &self.current_version
    }

    /// True when `stored` is missing or was produced by any other version.
    ///
    /// A record stamped with a *newer* version also qualifies: the current
    /// algorithm cannot vouch for figures it did not compute.
    pub fn needs_recalculation(&self, stored: Option<&ComputedMetrics>) -> bool {
        match stored {
            Some(metrics) => metrics.algorithm_version != self.current_version,
            None => true,
        }
    }

    /// True when `stored` was produced by an older version than the current one.
    pub fn is_outdated(&self, stored: &ComputedMetrics) -> bool {
        stored.algorithm_version < self.current_version
    }

    /// Compute fresh metrics with the current algorithm.
    pub fn recalculate(&self, dimensions: &SkiDimensions, weight_g: f64) -> CalcResult<ComputedMetrics> {
        let result = self.current.calculate(dimensions, weight_g)?;
        Ok(ComputedMetrics::stamp(result, self.current_version.clone()))
    }
}
