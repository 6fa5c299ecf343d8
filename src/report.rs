//! Assessment report encoding
//!
//! Encodes a fitness assessment into the versioned wellness.assessment.v1
//! envelope consumed by persistence and display collaborators. Provenance
//! timestamps are injected by the caller so the core calculation stays
//! bit-deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ScoreError;
use crate::types::{AgeBracket, FitnessAssessment, HealthProfile, NormalizedMetrics,
    Recommendation, ScoreBand};
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "wellness.assessment.v1";

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Report provenance information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProvenance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    pub computed_at_utc: String,
}

/// Input completeness metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuality {
    /// Share of the optional metric groups the caller supplied (0-1)
    pub coverage: f64,
    /// Names of the absent metric groups
    pub missing: Vec<String>,
}

/// Headline numbers of the assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub score: u8,
    pub band: ScoreBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    pub age_bracket: AgeBracket,
}

/// Complete wellness.assessment.v1 report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub provenance: ReportProvenance,
    pub quality: ReportQuality,
    pub summary: ReportSummary,
    /// Per-metric breakdown for display
    pub breakdown: NormalizedMetrics,
    pub recommendations: Vec<Recommendation>,
}

/// Optional metric groups tracked for coverage
const METRIC_GROUP_COUNT: usize = 6;

/// Encoder for producing assessment reports
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Encode an assessment with a caller-supplied computation timestamp
    pub fn encode(
        &self,
        profile: &HealthProfile,
        profile_id: Option<&str>,
        assessment: &FitnessAssessment,
        computed_at: DateTime<Utc>,
    ) -> AssessmentReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let provenance = ReportProvenance {
            profile_id: profile_id.map(|id| id.to_string()),
            computed_at_utc: computed_at.to_rfc3339(),
        };

        AssessmentReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            provenance,
            quality: build_quality(profile),
            summary: ReportSummary {
                score: assessment.score,
                band: assessment.band,
                bmi: assessment.bmi,
                age_bracket: assessment.age_bracket,
            },
            breakdown: assessment.normalized.clone(),
            recommendations: assessment.recommendations.clone(),
        }
    }

    /// Encode an assessment stamped with the current time. Intended for the
    /// CLI and FFI boundaries only.
    pub fn encode_now(
        &self,
        profile: &HealthProfile,
        profile_id: Option<&str>,
        assessment: &FitnessAssessment,
    ) -> AssessmentReport {
        self.encode(profile, profile_id, assessment, Utc::now())
    }

    /// Encode to a JSON string
    pub fn encode_to_json(
        &self,
        profile: &HealthProfile,
        profile_id: Option<&str>,
        assessment: &FitnessAssessment,
        computed_at: DateTime<Utc>,
    ) -> Result<String, ScoreError> {
        let report = self.encode(profile, profile_id, assessment, computed_at);
        serde_json::to_string_pretty(&report).map_err(ScoreError::JsonError)
    }
}

fn build_quality(profile: &HealthProfile) -> ReportQuality {
    let mut missing = Vec::new();
    let mut supplied = 0;

    let has_body = (profile.height_cm.is_some() && profile.weight_kg.is_some())
        || profile.bmi.is_some();
    if has_body {
        supplied += 1;
    } else {
        missing.push("body_measurements".to_string());
    }

    if profile.resting_heart_rate.is_some() {
        supplied += 1;
    } else {
        missing.push("heart_rate".to_string());
    }

    if profile.systolic_bp.is_some() && profile.diastolic_bp.is_some() {
        supplied += 1;
    } else {
        missing.push("blood_pressure".to_string());
    }

    if profile.hba1c_percent.is_some() {
        supplied += 1;
    } else {
        missing.push("hba1c".to_string());
    }

    if profile.stress_level.is_some() {
        supplied += 1;
    } else {
        missing.push("stress_level".to_string());
    }

    if profile.chronic_conditions.is_some() {
        supplied += 1;
    } else {
        missing.push("chronic_conditions".to_string());
    }

    ReportQuality {
        coverage: supplied as f64 / METRIC_GROUP_COUNT as f64,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::calculate_fitness_score;
    use crate::types::{ChronicConditions, Gender, SmokingStatus, StressLevel};

    fn make_test_profile() -> HealthProfile {
        HealthProfile {
            age: 68,
            gender: Gender::Male,
            height_cm: Some(165.0),
            weight_kg: Some(70.0),
            resting_heart_rate: Some(66),
            good_sleep_quality: true,
            exercise_minutes: 150,
            smoking_status: SmokingStatus::Never,
            alcohol_units: 0,
            chronic_conditions: Some(ChronicConditions::default()),
            stress_level: Some(StressLevel::None),
            systolic_bp: Some(125),
            diastolic_bp: Some(80),
            hba1c_percent: Some(5.6),
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_report_fields() {
        let profile = make_test_profile();
        let assessment = calculate_fitness_score(&profile).unwrap();
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let computed_at = "2026-03-01T09:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let report = encoder.encode(&profile, Some("profile-9"), &assessment, computed_at);

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.version, ENGINE_VERSION);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.provenance.profile_id.as_deref(), Some("profile-9"));
        assert_eq!(report.provenance.computed_at_utc, "2026-03-01T09:00:00+00:00");
        assert_eq!(report.summary.score, assessment.score);
        assert_eq!(report.summary.age_bracket, AgeBracket::Sixties);
    }

    #[test]
    fn test_full_profile_has_full_coverage() {
        let profile = make_test_profile();
        let quality = build_quality(&profile);
        assert!((quality.coverage - 1.0).abs() < 1e-9);
        assert!(quality.missing.is_empty());
    }

    #[test]
    fn test_sparse_profile_names_missing_groups() {
        let profile = HealthProfile {
            age: 70,
            ..Default::default()
        };
        let quality = build_quality(&profile);

        assert!((quality.coverage - 0.0).abs() < 1e-9);
        assert_eq!(quality.missing.len(), 6);
        assert!(quality.missing.contains(&"body_measurements".to_string()));
        assert!(quality.missing.contains(&"blood_pressure".to_string()));
    }

    #[test]
    fn test_supplied_bmi_counts_as_body_measurement() {
        let profile = HealthProfile {
            bmi: Some(25.0),
            ..Default::default()
        };
        let quality = build_quality(&profile);
        assert!(!quality.missing.contains(&"body_measurements".to_string()));
    }

    #[test]
    fn test_encode_to_json_is_valid() {
        let profile = make_test_profile();
        let assessment = calculate_fitness_score(&profile).unwrap();
        let encoder = ReportEncoder::new();

        let json = encoder
            .encode_to_json(&profile, None, &assessment, Utc::now())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed.get("report_version").is_some());
        assert!(parsed.get("quality").is_some());
        assert!(parsed.get("breakdown").is_some());
        assert!(parsed.get("recommendations").is_some());
        // Absent profile_id is omitted, not null
        assert!(parsed["provenance"].get("profile_id").is_none());
    }
}
