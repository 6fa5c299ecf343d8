//! Adapter for converting wellness.profile.v1 records to HealthProfile
//!
//! Handles batch parsing (JSON array and NDJSON), validation reporting, and
//! canonicalization: unit conversion to metric and documented defaults for
//! absent fields.

use crate::error::ScoreError;
use crate::reference::{CM_PER_INCH, KG_PER_POUND};
use crate::schema::profile::{
    HeightUnit, RawProfile, ValidationError, WeightUnit,
};
use crate::types::{ChronicConditions, Gender, HealthProfile, SmokingStatus};

/// Default age when the record omits it: the population is seniors
const DEFAULT_AGE: u32 = 65;

/// Adapter for raw profile records
pub struct ProfileAdapter;

impl ProfileAdapter {
    /// Parse a JSON string containing an array of RawProfiles
    pub fn parse_array(json: &str) -> Result<Vec<RawProfile>, ScoreError> {
        let profiles: Vec<RawProfile> = serde_json::from_str(json)?;
        Ok(profiles)
    }

    /// Parse NDJSON (newline-delimited JSON) containing RawProfiles
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawProfile>, ScoreError> {
        let mut profiles = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawProfile>(trimmed) {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    return Err(ScoreError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(profiles)
    }

    /// Validate a batch of profiles, returning one entry per invalid record
    pub fn validate_profiles(profiles: &[RawProfile]) -> Vec<ValidationFailure> {
        profiles
            .iter()
            .enumerate()
            .filter_map(|(index, profile)| {
                profile.validate().err().map(|error| ValidationFailure {
                    index,
                    profile_id: profile.profile_id.clone(),
                    error,
                })
            })
            .collect()
    }

    /// Convert a raw record into the canonical metric profile.
    ///
    /// Applies schema validation, converts imperial measurements, and fills
    /// the documented defaults (age 65, gender other, lifestyle zeros).
    pub fn to_canonical(raw: &RawProfile) -> Result<HealthProfile, ScoreError> {
        raw.validate()
            .map_err(|e| ScoreError::InvalidProfile(e.to_string()))?;

        let height_cm = raw.height.map(|h| match h.unit {
            HeightUnit::Cm => h.value,
            HeightUnit::In => h.value * CM_PER_INCH,
        });
        let weight_kg = raw.weight.map(|w| match w.unit {
            WeightUnit::Kg => w.value,
            WeightUnit::Lb => w.value * KG_PER_POUND,
        });

        let chronic_conditions = raw.chronic_conditions.map(|c| ChronicConditions {
            diabetes: c.diabetes as u8,
            hypertension: c.hypertension as u8,
            heart_related: c.heart_related as u8,
            cancer: c.cancer as u8,
            others: c.others as u8,
        });

        Ok(HealthProfile {
            age: raw.age.map(|a| a as u32).unwrap_or(DEFAULT_AGE),
            gender: raw.gender.unwrap_or(Gender::Other),
            height_cm,
            weight_kg,
            bmi: raw.bmi,
            resting_heart_rate: raw.heart_rate.map(|hr| hr as u32),
            good_sleep_quality: raw.good_sleep_quality.unwrap_or(false),
            exercise_minutes: raw.exercise_minutes.map(|m| m as u32).unwrap_or(0),
            smoking_status: raw.smoking_status.unwrap_or(SmokingStatus::Never),
            alcohol_units: raw.alcohol_units.map(|u| u as u32).unwrap_or(0),
            chronic_conditions,
            stress_level: raw.stress_level,
            hba1c_percent: raw.hba1c,
            systolic_bp: raw.systolic_bp.map(|v| v as u32),
            diastolic_bp: raw.diastolic_bp.map(|v| v as u32),
        })
    }
}

/// A failed schema validation, with enough context to report it
#[derive(Debug)]
pub struct ValidationFailure {
    pub index: usize,
    pub profile_id: Option<String>,
    pub error: ValidationError,
}
