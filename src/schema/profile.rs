//! wellness.profile.v1 schema definition
//!
//! The raw input record submitted by form handlers and batch recompute jobs.
//! Measurements carry unit tags (cm/in, kg/lb); everything beyond age is
//! optional, with defaults applied during canonicalization. Validation here
//! is the strict gate: the engine itself only checks biometric positivity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Gender, SmokingStatus, StressLevel};

/// Current input schema version
pub const SCHEMA_VERSION: &str = "wellness.profile.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    Cm,
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

/// Unit-tagged height measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Height {
    pub value: f64,
    pub unit: HeightUnit,
}

/// Unit-tagged weight measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    pub unit: WeightUnit,
}

/// Chronic condition severities as submitted, each expected in 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChronicConditions {
    #[serde(default)]
    pub diabetes: i64,
    #[serde(default)]
    pub hypertension: i64,
    #[serde(default)]
    pub heart_related: i64,
    #[serde(default)]
    pub cancer: i64,
    #[serde(default)]
    pub others: i64,
}

impl RawChronicConditions {
    fn fields(&self) -> [(&'static str, i64); 5] {
        [
            ("diabetes", self.diabetes),
            ("hypertension", self.hypertension),
            ("heart_related", self.heart_related),
            ("cancer", self.cancer),
            ("others", self.others),
        ]
    }
}

/// The main wellness.profile.v1 record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    /// Schema version identifier
    pub schema_version: String,
    /// Stable identifier assigned by the caller, echoed into report provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Height>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    /// Precomputed BMI fallback, used only when height and weight are absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// Resting heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_sleep_quality: Option<bool>,
    /// Weekly moderate-activity minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking_status: Option<SmokingStatus>,
    /// Weekly standard drink units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol_units: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_conditions: Option<RawChronicConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<StressLevel>,
    /// Blood glucose control marker (percent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic_bp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic_bp: Option<i64>,
}

impl Default for RawProfile {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            profile_id: None,
            age: None,
            gender: None,
            height: None,
            weight: None,
            bmi: None,
            heart_rate: None,
            good_sleep_quality: None,
            exercise_minutes: None,
            smoking_status: None,
            alcohol_units: None,
            chronic_conditions: None,
            stress_level: None,
            hba1c: None,
            systolic_bp: None,
            diastolic_bp: None,
        }
    }
}

impl RawProfile {
    /// Create an empty profile with a generated profile ID
    pub fn new() -> Self {
        Self {
            profile_id: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        }
    }

    /// Validate the record against the schema.
    ///
    /// Negative exercise minutes are rejected here rather than silently
    /// scored, the same treatment as nonpositive height and weight.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ValidationError::InvalidSchemaVersion {
                expected: SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }

        if let Some(height) = &self.height {
            if height.value <= 0.0 {
                return Err(ValidationError::NonPositiveMeasurement {
                    field: "height",
                    value: height.value,
                });
            }
        }
        if let Some(weight) = &self.weight {
            if weight.value <= 0.0 {
                return Err(ValidationError::NonPositiveMeasurement {
                    field: "weight",
                    value: weight.value,
                });
            }
        }
        if let Some(bmi) = self.bmi {
            if bmi <= 0.0 {
                return Err(ValidationError::NonPositiveMeasurement {
                    field: "bmi",
                    value: bmi,
                });
            }
        }
        if let Some(hba1c) = self.hba1c {
            if hba1c <= 0.0 {
                return Err(ValidationError::NonPositiveMeasurement {
                    field: "hba1c",
                    value: hba1c,
                });
            }
        }

        for (field, value) in [
            ("age", self.age),
            ("exercise_minutes", self.exercise_minutes),
            ("alcohol_units", self.alcohol_units),
        ] {
            if let Some(value) = value {
                if value < 0 {
                    return Err(ValidationError::NegativeValue { field, value });
                }
            }
        }

        for (field, value) in [
            ("heart_rate", self.heart_rate),
            ("systolic_bp", self.systolic_bp),
            ("diastolic_bp", self.diastolic_bp),
        ] {
            if let Some(value) = value {
                if value <= 0 {
                    return Err(ValidationError::NonPositiveMeasurement {
                        field,
                        value: value as f64,
                    });
                }
            }
        }

        if let Some(conditions) = &self.chronic_conditions {
            for (field, value) in conditions.fields() {
                if !(0..=100).contains(&value) {
                    return Err(ValidationError::SeverityOutOfRange { field, value });
                }
            }
        }

        Ok(())
    }
}

/// Validation errors for raw profiles
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid schema version: expected {expected}, got {actual}")]
    InvalidSchemaVersion { expected: String, actual: String },

    #[error("{field} must be positive, got {value}")]
    NonPositiveMeasurement { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: i64 },

    #[error("chronic condition severity {field} must be in 0-100, got {value}")]
    SeverityOutOfRange { field: &'static str, value: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_profile() {
        let json = r#"{
            "schema_version": "wellness.profile.v1",
            "profile_id": "p-1",
            "age": 72,
            "gender": "female",
            "height": {"value": 64.0, "unit": "in"},
            "weight": {"value": 150.0, "unit": "lb"},
            "heart_rate": 70,
            "good_sleep_quality": false,
            "exercise_minutes": 90,
            "smoking_status": "former",
            "alcohol_units": 3,
            "chronic_conditions": {"diabetes": 40, "hypertension": 20},
            "stress_level": "mild",
            "hba1c": 6.4,
            "systolic_bp": 138,
            "diastolic_bp": 86
        }"#;

        let profile: RawProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.schema_version, SCHEMA_VERSION);
        assert_eq!(profile.gender, Some(Gender::Female));
        assert_eq!(profile.height.unwrap().unit, HeightUnit::In);
        assert_eq!(profile.weight.unwrap().unit, WeightUnit::Lb);
        let conditions = profile.chronic_conditions.unwrap();
        assert_eq!(conditions.diabetes, 40);
        assert_eq!(conditions.cancer, 0);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_minimal_profile_is_valid() {
        let json = r#"{"schema_version": "wellness.profile.v1"}"#;
        let profile: RawProfile = serde_json::from_str(json).unwrap();
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_rejects_wrong_schema_version() {
        let profile = RawProfile {
            schema_version: "wellness.profile.v2".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ValidationError::InvalidSchemaVersion { .. })
        ));
    }

    #[test]
    fn test_rejects_nonpositive_measurements() {
        let profile = RawProfile {
            height: Some(Height {
                value: 0.0,
                unit: HeightUnit::Cm,
            }),
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ValidationError::NonPositiveMeasurement { field: "height", .. })
        ));

        let profile = RawProfile {
            heart_rate: Some(-5),
            ..Default::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_exercise_minutes() {
        let profile = RawProfile {
            exercise_minutes: Some(-30),
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ValidationError::NegativeValue {
                field: "exercise_minutes",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_severity_out_of_range() {
        let profile = RawProfile {
            chronic_conditions: Some(RawChronicConditions {
                diabetes: 150,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ValidationError::SeverityOutOfRange {
                field: "diabetes",
                ..
            })
        ));
    }

    #[test]
    fn test_new_assigns_profile_id() {
        let profile = RawProfile::new();
        assert!(profile.profile_id.is_some());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let json = serde_json::to_string(&RawProfile::default()).unwrap();
        assert!(json.contains("schema_version"));
        assert!(!json.contains("heart_rate"));
        assert!(!json.contains("profile_id"));
    }
}
