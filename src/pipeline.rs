//! Pipeline orchestration
//!
//! This module provides the public API for the scoring engine: a single
//! synchronous transform from a health profile to a fitness assessment.
//! The calculation is stateless and side-effect-free, so callers may invoke
//! it concurrently without synchronization.

use chrono::Utc;

use crate::error::ScoreError;
use crate::normalizer::Normalizer;
use crate::recommend::RecommendationEngine;
use crate::report::ReportEncoder;
use crate::schema::{ProfileAdapter, RawProfile};
use crate::scorer::Scorer;
use crate::types::{FitnessAssessment, HealthProfile, ScoreBand};

/// Calculate a fitness assessment for a health profile.
///
/// Pipeline stages:
/// 1. Normalizer - per-metric wellness fractions (may fail on biometrics)
/// 2. Scorer - gender-conditioned weighted aggregation to 0-100
/// 3. RecommendationEngine - threshold rules against the raw profile
///
/// # Example
/// ```ignore
/// let assessment = calculate_fitness_score(&profile)?;
/// println!("score: {} ({:?})", assessment.score, assessment.band);
/// ```
pub fn calculate_fitness_score(profile: &HealthProfile) -> Result<FitnessAssessment, ScoreError> {
    let normalized = Normalizer::normalize(profile)?;
    let score = Scorer::aggregate(&normalized.metrics, profile.gender);
    let recommendations = RecommendationEngine::generate(profile);

    Ok(FitnessAssessment {
        score,
        band: ScoreBand::of_score(score),
        bmi: normalized.bmi_value,
        age_bracket: normalized.bracket,
        normalized: normalized.metrics,
        recommendations,
    })
}

/// Engine wrapper that pairs the pure calculation with report encoding.
///
/// Use this at I/O boundaries (CLI, FFI, batch jobs) where raw profile JSON
/// comes in and versioned assessment reports go out.
pub struct ScoreEngine {
    encoder: ReportEncoder,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreEngine {
    /// Create an engine with a unique encoder instance ID
    pub fn new() -> Self {
        Self {
            encoder: ReportEncoder::new(),
        }
    }

    /// Create an engine with a specific encoder instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self {
            encoder: ReportEncoder::with_instance_id(instance_id),
        }
    }

    /// Score a canonical profile
    pub fn assess(&self, profile: &HealthProfile) -> Result<FitnessAssessment, ScoreError> {
        calculate_fitness_score(profile)
    }

    /// Score a raw profile record and encode the assessment report.
    ///
    /// The provenance timestamp is stamped here, at the boundary; the core
    /// calculation itself never reads the clock.
    pub fn assess_raw(&self, raw: &RawProfile) -> Result<String, ScoreError> {
        let profile = ProfileAdapter::to_canonical(raw)?;
        let assessment = calculate_fitness_score(&profile)?;
        let report = self.encoder.encode(
            &profile,
            raw.profile_id.as_deref(),
            &assessment,
            Utc::now(),
        );
        serde_json::to_string(&report).map_err(ScoreError::JsonError)
    }

    /// Score a single raw profile supplied as a JSON string
    pub fn assess_json(&self, json: &str) -> Result<String, ScoreError> {
        let raw: RawProfile = serde_json::from_str(json)?;
        self.assess_raw(&raw)
    }

    /// Score a batch of raw profiles, one report JSON string per profile
    pub fn assess_batch(&self, raws: &[RawProfile]) -> Result<Vec<String>, ScoreError> {
        raws.iter().map(|raw| self.assess_raw(raw)).collect()
    }
}
