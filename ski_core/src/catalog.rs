//! # Ski Catalog
//!
//! In-memory, JSON-serializable collection of ski records. Each record keeps
//! its raw geometry, its computed metrics (stamped with an algorithm
//! version) and free-form notes.
//!
//! ## Structure
//!
//! ```text
//! Catalog
//! ├── settings: CalculationSettings (current algorithm)
//! └── items: HashMap<Uuid, SkiSpec>
//!     ├── dimensions, weight_g
//!     ├── metrics: Option<ComputedMetrics>
//!     └── notes: Vec<Note>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ski_core::catalog::{Catalog, SkiSpec};
//! use ski_core::SkiDimensions;
//!
//! let mut catalog = Catalog::default();
//! let dims = SkiDimensions::new(180.0, 145.0, 108.0, 135.0, 18.0);
//! let id = catalog.add(SkiSpec::new("Faction", "Dancer 2", dims, 1850.0)).unwrap();
//!
//! let metrics = catalog.get(&id).unwrap().metrics.as_ref().unwrap();
//! assert_eq!(metrics.algorithm_version.to_string(), "2.0.0");
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dimensions::SkiDimensions;
use crate::errors::{CalcError, CalcResult};
use crate::settings::CalculationSettings;
use crate::versioning::{ComputedMetrics, RecalculationPolicy};

/// A free-form annotation on a ski record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// One catalogued ski.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkiSpec {
    /// Manufacturer (e.g., "Atomic")
    pub brand: String,

    /// Model name (e.g., "Bent 100")
    pub model: String,

    /// Model year, if known
    pub year: Option<u16>,

    /// Raw geometry
    pub dimensions: SkiDimensions,

    /// Weight of one ski in grams
    pub weight_g: f64,

    /// Derived figures; `None` until computed
    pub metrics: Option<ComputedMetrics>,

    /// Annotations, oldest first
    #[serde(default)]
    pub notes: Vec<Note>,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl SkiSpec {
    /// Create a record without metrics.
    pub fn new(brand: impl Into<String>, model: impl Into<String>, dimensions: SkiDimensions, weight_g: f64) -> Self {
        let now = Utc::now();
        SkiSpec {
            brand: brand.into(),
            model: model.into(),
            year: None,
            dimensions,
            weight_g,
            metrics: None,
            notes: Vec::new(),
            created: now,
            modified: now,
        }
    }

    /// Set the model year
    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// "Brand Model" label
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    fn touch(&mut self) {
        self.modified = Utc::now();
    }

    fn matches(&self, query: &str) -> bool {
        self.brand.to_lowercase().contains(query) || self.model.to_lowercase().contains(query)
    }
}

/// A record that could not be recalculated and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalculationFailure {
    pub id: Uuid,
    pub error: CalcError,
}

/// Outcome of [`Catalog::recalculate_stale`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecalculationReport {
    /// Records now stamped with the current version
    pub updated: Vec<Uuid>,

    /// Records left untouched because the current algorithm rejects them
    pub failed: Vec<RecalculationFailure>,
}

/// Side-by-side differences between two records (`right − left`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub left: Uuid,
    pub right: Uuid,
    pub length_cm: f64,
    pub tip_mm: f64,
    pub waist_mm: f64,
    pub tail_mm: f64,
    pub weight_g: f64,

    /// Only present when both records were computed by the same version
    pub surface_area: Option<f64>,

    /// Only present when both records were computed by the same version
    pub relative_weight: Option<f64>,
}

impl Comparison {
    /// Whether the derived figures could be compared
    pub fn metrics_comparable(&self) -> bool {
        self.surface_area.is_some()
    }
}

/// Collection of ski records keyed by UUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Algorithm used for new and refreshed records
    pub settings: CalculationSettings,

    /// All records
    pub items: HashMap<Uuid, SkiSpec>,
}

impl Catalog {
    /// Create an empty catalog.
    ///
    /// # Errors
    ///
    /// Fails when `settings` cannot build an equation.
    pub fn new(settings: CalculationSettings) -> CalcResult<Self> {
        settings.build_equation()?;
        Ok(Catalog {
            settings,
            items: HashMap::new(),
        })
    }

    fn policy(&self) -> CalcResult<RecalculationPolicy> {
        RecalculationPolicy::new(self.settings.build_equation()?)
    }

    /// Switch the current algorithm.
    ///
    /// Existing records keep their metrics and version; use
    /// [`Catalog::recalculate_stale`] to refresh them.
    ///
    /// Staleness is keyed on the version tag alone. Changing only
    /// `waist_position` or `tip_ratio` keeps the integral model at the same
    /// version, so no record is flagged; call [`Catalog::recalculate_all`]
    /// after such a change.
    pub fn set_settings(&mut self, settings: CalculationSettings) -> CalcResult<()> {
        settings.build_equation()?;
        self.settings = settings;
        Ok(())
    }

    /// Compute metrics for `spec` with the current algorithm and store it.
    ///
    /// A record whose geometry the current algorithm rejects is not stored.
    pub fn add(&mut self, mut spec: SkiSpec) -> CalcResult<Uuid> {
        let metrics = self.policy()?.recalculate(&spec.dimensions, spec.weight_g)?;
        spec.metrics = Some(metrics);

        let id = Uuid::new_v4();
        self.items.insert(id, spec);
        Ok(id)
    }

    /// Get a record by UUID.
    pub fn get(&self, id: &Uuid) -> Option<&SkiSpec> {
        self.items.get(id)
    }

    /// Remove a record by UUID.
    pub fn remove(&mut self, id: &Uuid) -> Option<SkiSpec> {
        self.items.remove(id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace geometry and weight, recomputing metrics.
    ///
    /// The record is left unchanged if the new geometry is rejected.
    pub fn update_dimensions(&mut self, id: &Uuid, dimensions: SkiDimensions, weight_g: f64) -> CalcResult<&SkiSpec> {
        let policy = self.policy()?;
        let spec = self.items.get_mut(id).ok_or_else(|| CalcError::record_not_found(id))?;

        let metrics = policy.recalculate(&dimensions, weight_g)?;
        spec.dimensions = dimensions;
        spec.weight_g = weight_g;
        spec.metrics = Some(metrics);
        spec.touch();
        Ok(&*spec)
    }

    /// Append a note to a record, returning the note's UUID.
    pub fn add_note(&mut self, id: &Uuid, text: impl Into<String>) -> CalcResult<Uuid> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CalcError::invalid_input("note", text, "Note text cannot be empty"));
        }

        let spec = self.items.get_mut(id).ok_or_else(|| CalcError::record_not_found(id))?;
        let note = Note {
            id: Uuid::new_v4(),
            text,
            created: Utc::now(),
        };
        let note_id = note.id;
        spec.notes.push(note);
        spec.touch();
        Ok(note_id)
    }

    /// Case-insensitive substring match on brand or model. Order is unspecified.
    pub fn search(&self, query: &str) -> Vec<(Uuid, &SkiSpec)> {
        let query = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|(_, spec)| spec.matches(&query))
            .map(|(id, spec)| (*id, spec))
            .collect()
    }

    /// Records whose metrics are missing or were computed by another version.
    pub fn stale_ids(&self) -> CalcResult<Vec<Uuid>> {
        let policy = self.policy()?;
        Ok(self
            .items
            .iter()
            .filter(|(_, spec)| policy.needs_recalculation(spec.metrics.as_ref()))
            .map(|(id, _)| *id)
            .collect())
    }

    /// Recompute every stale record with the current algorithm.
    ///
    /// Failures are collected, not propagated; the failing records keep
    /// their previous metrics.
    pub fn recalculate_stale(&mut self) -> CalcResult<RecalculationReport> {
        self.recalculate_where(false)
    }

    /// Recompute every record with the current algorithm, stale or not.
    ///
    /// Needed after a settings change that keeps the version tag, such as
    /// new integral ratios. Failures are collected as in
    /// [`Catalog::recalculate_stale`].
    pub fn recalculate_all(&mut self) -> CalcResult<RecalculationReport> {
        self.recalculate_where(true)
    }

    fn recalculate_where(&mut self, force: bool) -> CalcResult<RecalculationReport> {
        let policy = self.policy()?;
        let mut report = RecalculationReport::default();

        for (id, spec) in self.items.iter_mut() {
            if !force && !policy.needs_recalculation(spec.metrics.as_ref()) {
                continue;
            }
            match policy.recalculate(&spec.dimensions, spec.weight_g) {
                Ok(metrics) => {
                    spec.metrics = Some(metrics);
                    spec.touch();
                    report.updated.push(*id);
                }
                Err(error) => report.failed.push(RecalculationFailure { id: *id, error }),
            }
        }

        #[cfg(feature = "logging")]
        tracing::debug!(
            version = %policy.current_version(),
            force,
            updated = report.updated.len(),
            failed = report.failed.len(),
            "records recalculated"
        );

        Ok(report)
    }

    /// Compare two records.
    ///
    /// Deltas are only reported for matching version tags. Two integral
    /// results computed with different ratios share a tag, so they are
    /// compared as if they came from the same model.
    pub fn compare(&self, left: &Uuid, right: &Uuid) -> CalcResult<Comparison> {
        let a = self.get(left).ok_or_else(|| CalcError::record_not_found(left))?;
        let b = self.get(right).ok_or_else(|| CalcError::record_not_found(right))?;

        let same_version = |x: &ComputedMetrics, y: &ComputedMetrics| x.algorithm_version == y.algorithm_version;
        let (surface_area, relative_weight) = match (&a.metrics, &b.metrics) {
            (Some(ma), Some(mb)) if same_version(ma, mb) => (
                Some(mb.surface_area - ma.surface_area),
                Some(mb.relative_weight - ma.relative_weight),
            ),
            _ => (None, None),
        };

        Ok(Comparison {
            left: *left,
            right: *right,
            length_cm: b.dimensions.length_cm - a.dimensions.length_cm,
            tip_mm: b.dimensions.tip_mm - a.dimensions.tip_mm,
            waist_mm: b.dimensions.waist_mm - a.dimensions.waist_mm,
            tail_mm: b.dimensions.tail_mm - a.dimensions.tail_mm,
            weight_g: b.weight_g - a.weight_g,
            surface_area,
            relative_weight,
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            settings: CalculationSettings::default(),
            items: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::EquationKind;

    fn freeride() -> SkiSpec {
        SkiSpec::new("Faction", "Dancer 2", SkiDimensions::new(180.0, 145.0, 108.0, 135.0, 18.0), 1850.0)
            .with_year(2024)
    }

    fn all_mountain() -> SkiSpec {
        SkiSpec::new("Atomic", "Maverick 100", SkiDimensions::new(186.0, 140.0, 106.0, 128.0, 21.0), 1800.0)
    }

    #[test]
    fn test_add_computes_metrics() {
        let mut catalog = Catalog::default();
        let id = catalog.add(freeride()).unwrap();

        let spec = catalog.get(&id).unwrap();
        let metrics = spec.metrics.as_ref().unwrap();
        assert_eq!(metrics.surface_area, 2103.81);
        assert_eq!(metrics.relative_weight, 0.88);
        assert_eq!(metrics.algorithm_version.to_string(), "2.0.0");
        assert_eq!(spec.year, Some(2024));
        assert_eq!(spec.display_name(), "Faction Dancer 2");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_geometry() {
        let mut catalog = Catalog::default();
        let mut spec = freeride();
        spec.dimensions.length_cm = 0.0;

        let err = catalog.add(spec).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION_LENGTHS");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_add_rejects_infinite_width() {
        let mut catalog = Catalog::default();
        let mut spec = freeride();
        spec.dimensions.tip_mm = f64::INFINITY;

        let err = catalog.add(spec).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SURFACE_AREA");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let settings = CalculationSettings {
            algorithm: EquationKind::Integral,
            waist_position: 0.5,
            tip_ratio: 0.5,
        };
        assert!(Catalog::new(settings).is_err());
    }

    #[test]
    fn test_remove() {
        let mut catalog = Catalog::default();
        let id = catalog.add(freeride()).unwrap();
        assert!(catalog.remove(&id).is_some());
        assert!(catalog.remove(&id).is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_update_dimensions() {
        let mut catalog = Catalog::new(CalculationSettings::with_algorithm(EquationKind::Simple)).unwrap();
        let id = catalog.add(freeride()).unwrap();

        let updated = catalog
            .update_dimensions(&id, SkiDimensions::new(180.0, 130.0, 100.0, 120.0, 17.0), 1200.0)
            .unwrap();
        let metrics = updated.metrics.as_ref().unwrap();
        assert!((metrics.surface_area - 2100.0).abs() < 1e-9);
        assert_eq!(metrics.relative_weight, 0.57);
    }

    #[test]
    fn test_update_rejected_leaves_record() {
        let mut catalog = Catalog::default();
        let id = catalog.add(freeride()).unwrap();
        let before = catalog.get(&id).unwrap().clone();

        let err = catalog
            .update_dimensions(&id, SkiDimensions::new(0.5, 145.0, 108.0, 135.0, 18.0), 1850.0)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TIP_LENGTH");
        assert_eq!(catalog.get(&id).unwrap(), &before);
    }

    #[test]
    fn test_update_missing_record() {
        let mut catalog = Catalog::default();
        let err = catalog
            .update_dimensions(&Uuid::new_v4(), freeride().dimensions, 1850.0)
            .unwrap_err();
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_notes() {
        let mut catalog = Catalog::default();
        let id = catalog.add(freeride()).unwrap();

        let note_id = catalog.add_note(&id, "Mounted +1 from recommended").unwrap();
        let spec = catalog.get(&id).unwrap();
        assert_eq!(spec.notes.len(), 1);
        assert_eq!(spec.notes[0].id, note_id);

        assert_eq!(catalog.add_note(&id, "   ").unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(
            catalog.add_note(&Uuid::new_v4(), "orphan").unwrap_err().error_code(),
            "RECORD_NOT_FOUND"
        );
    }

    #[test]
    fn test_search() {
        let mut catalog = Catalog::default();
        let faction = catalog.add(freeride()).unwrap();
        catalog.add(all_mountain()).unwrap();

        let hits = catalog.search("dancer");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, faction);

        assert_eq!(catalog.search("  ATOMIC ").len(), 1);
        assert_eq!(catalog.search("").len(), 2);
        assert!(catalog.search("volkl").is_empty());
    }

    #[test]
    fn test_switching_algorithm_keeps_versions_until_recalculated() {
        let mut catalog = Catalog::new(CalculationSettings::with_algorithm(EquationKind::Simple)).unwrap();
        let a = catalog.add(freeride()).unwrap();
        let b = catalog.add(all_mountain()).unwrap();
        assert!(catalog.stale_ids().unwrap().is_empty());

        catalog.set_settings(CalculationSettings::default()).unwrap();

        // Old figures untouched by the switch itself
        let stored = catalog.get(&b).unwrap().metrics.as_ref().unwrap();
        assert_eq!(stored.algorithm_version.to_string(), "1.0.0");
        assert!((stored.surface_area - 2318.8).abs() < 1e-9);

        let mut stale = catalog.stale_ids().unwrap();
        stale.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(stale, expected);

        let report = catalog.recalculate_stale().unwrap();
        assert_eq!(report.updated.len(), 2);
        assert!(report.failed.is_empty());
        assert!(catalog.stale_ids().unwrap().is_empty());

        let refreshed = catalog.get(&a).unwrap().metrics.as_ref().unwrap();
        assert_eq!(refreshed.algorithm_version.to_string(), "2.0.0");
        assert_eq!(refreshed.surface_area, 2103.81);
    }

    #[test]
    fn test_recalculate_collects_failures() {
        let mut catalog = Catalog::new(CalculationSettings::with_algorithm(EquationKind::Simple)).unwrap();
        // Accepted by the trapezoid, too short for the integral tip section
        let tiny = SkiSpec::new("Toy", "Mini", SkiDimensions::new(0.5, 145.0, 108.0, 135.0, 1.0), 10.0);
        let tiny_id = catalog.add(tiny).unwrap();
        catalog.add(freeride()).unwrap();

        catalog.set_settings(CalculationSettings::default()).unwrap();
        let report = catalog.recalculate_stale().unwrap();

        assert_eq!(report.updated.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, tiny_id);
        assert_eq!(report.failed[0].error.error_code(), "INVALID_TIP_LENGTH");

        let kept = catalog.get(&tiny_id).unwrap().metrics.as_ref().unwrap();
        assert_eq!(kept.algorithm_version.to_string(), "1.0.0");
    }

    #[test]
    fn test_ratio_change_needs_full_recalculation() {
        let mut catalog = Catalog::default();
        let id = catalog.add(freeride()).unwrap();

        let tuned = CalculationSettings {
            algorithm: EquationKind::Integral,
            waist_position: 0.40,
            tip_ratio: 0.20,
        };
        catalog.set_settings(tuned).unwrap();

        // Same version tag, so nothing counts as stale
        assert!(catalog.stale_ids().unwrap().is_empty());
        assert!(catalog.recalculate_stale().unwrap().updated.is_empty());
        assert_eq!(catalog.get(&id).unwrap().metrics.as_ref().unwrap().surface_area, 2103.81);

        let report = catalog.recalculate_all().unwrap();
        assert_eq!(report.updated, vec![id]);
        assert!(report.failed.is_empty());

        let metrics = catalog.get(&id).unwrap().metrics.as_ref().unwrap();
        assert_eq!(metrics.algorithm_version.to_string(), "2.0.0");
        assert_ne!(metrics.surface_area, 2103.81);
    }

    #[test]
    fn test_set_settings_rejects_invalid() {
        let mut catalog = Catalog::default();
        let bad = CalculationSettings {
            algorithm: EquationKind::Integral,
            waist_position: 0.9,
            tip_ratio: 0.2,
        };
        assert!(catalog.set_settings(bad).is_err());
        assert_eq!(catalog.settings, CalculationSettings::default());
    }

    #[test]
    fn test_compare_same_version() {
        let mut catalog = Catalog::new(CalculationSettings::with_algorithm(EquationKind::Simple)).unwrap();
        let left = catalog.add(freeride()).unwrap();
        let right = catalog.add(all_mountain()).unwrap();

        let cmp = catalog.compare(&left, &right).unwrap();
        assert_eq!(cmp.length_cm, 6.0);
        assert_eq!(cmp.tip_mm, -5.0);
        assert_eq!(cmp.weight_g, -50.0);
        assert!(cmp.metrics_comparable());
        // 2318.8 − 2328.0
        assert!((cmp.surface_area.unwrap() + 9.2).abs() < 1e-6);
    }

    #[test]
    fn test_compare_across_versions_omits_metrics() {
        let mut catalog = Catalog::new(CalculationSettings::with_algorithm(EquationKind::Simple)).unwrap();
        let left = catalog.add(freeride()).unwrap();
        catalog.set_settings(CalculationSettings::default()).unwrap();
        let right = catalog.add(all_mountain()).unwrap();

        let cmp = catalog.compare(&left, &right).unwrap();
        assert!(!cmp.metrics_comparable());
        assert!(cmp.relative_weight.is_none());

        let missing = catalog.compare(&left, &Uuid::new_v4()).unwrap_err();
        assert_eq!(missing.error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_catalog_serialization() {
        let mut catalog = Catalog::default();
        let id = catalog.add(freeride()).unwrap();
        catalog.add_note(&id, "Stiff tail").unwrap();

        let json = serde_json::to_string_pretty(&catalog).unwrap();
        assert!(json.contains("Dancer 2"));
        assert!(json.contains("\"algorithm_version\": \"2.0.0\""));

        let roundtrip: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, catalog);
    }
}
