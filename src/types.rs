//! Core types for the senwell scoring engine
//!
//! This module defines the data structures that flow through the calculation:
//! the canonical health profile, the normalized metric fractions, and the
//! final assessment returned to callers.

use serde::{Deserialize, Serialize};

/// Gender selects the weight vector used during aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Smoking status classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmokingStatus {
    #[default]
    Never,
    Former,
    Current,
}

/// Self-reported stress level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    None,
    Mild,
    High,
}

/// Clinical age bracket used to select reference ranges.
///
/// Brackets are half-open: an age below 50 resolves to "40-49" and an age of
/// 80 or above resolves to "80+", so every age maps to a valid bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "40-49")]
    Forties,
    #[serde(rename = "50-59")]
    Fifties,
    #[serde(rename = "60-69")]
    Sixties,
    #[serde(rename = "70-79")]
    Seventies,
    #[serde(rename = "80+")]
    EightiesPlus,
}

impl AgeBracket {
    /// Resolve the bracket for an age. Total over all unsigned ages.
    pub fn of(age: u32) -> Self {
        match age {
            0..=49 => AgeBracket::Forties,
            50..=59 => AgeBracket::Fifties,
            60..=69 => AgeBracket::Sixties,
            70..=79 => AgeBracket::Seventies,
            _ => AgeBracket::EightiesPlus,
        }
    }

    /// Index into the per-bracket reference tables
    pub fn index(&self) -> usize {
        match self {
            AgeBracket::Forties => 0,
            AgeBracket::Fifties => 1,
            AgeBracket::Sixties => 2,
            AgeBracket::Seventies => 3,
            AgeBracket::EightiesPlus => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Forties => "40-49",
            AgeBracket::Fifties => "50-59",
            AgeBracket::Sixties => "60-69",
            AgeBracket::Seventies => "70-79",
            AgeBracket::EightiesPlus => "80+",
        }
    }
}

/// Severity scores for tracked chronic conditions, each 0 (none) to 100 (severe)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronicConditions {
    pub diabetes: u8,
    pub hypertension: u8,
    pub heart_related: u8,
    pub cancer: u8,
    pub others: u8,
}

impl ChronicConditions {
    /// Mean severity across the five tracked conditions
    pub fn severity_mean(&self) -> f64 {
        let total = self.diabetes as u32
            + self.hypertension as u32
            + self.heart_related as u32
            + self.cancer as u32
            + self.others as u32;
        total as f64 / 5.0
    }
}

/// Canonical health profile consumed by the scoring engine.
///
/// All measurements are metric: imperial inputs are converted at the schema
/// boundary (`ProfileAdapter::to_canonical`). Absent optional clinical metrics
/// resolve to neutral normalized fractions rather than zero, so missing data
/// does not unfairly penalize the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
    /// Measured height (cm). Takes precedence over `bmi` when paired with weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Measured weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Precomputed BMI, used only when measured height and weight are absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// Resting heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<u32>,
    #[serde(default)]
    pub good_sleep_quality: bool,
    /// Weekly moderate-activity minutes
    #[serde(default)]
    pub exercise_minutes: u32,
    #[serde(default)]
    pub smoking_status: SmokingStatus,
    /// Weekly standard drink units
    #[serde(default)]
    pub alcohol_units: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_conditions: Option<ChronicConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<StressLevel>,
    /// Blood glucose control marker (percent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hba1c_percent: Option<f64>,
    /// Systolic blood pressure (mmHg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic_bp: Option<u32>,
    /// Diastolic blood pressure (mmHg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic_bp: Option<u32>,
}

impl Default for HealthProfile {
    fn default() -> Self {
        Self {
            // The target population is seniors
            age: 65,
            gender: Gender::Other,
            height_cm: None,
            weight_kg: None,
            bmi: None,
            resting_heart_rate: None,
            good_sleep_quality: false,
            exercise_minutes: 0,
            smoking_status: SmokingStatus::Never,
            alcohol_units: 0,
            chronic_conditions: None,
            stress_level: None,
            hba1c_percent: None,
            systolic_bp: None,
            diastolic_bp: None,
        }
    }
}

/// Per-metric wellness fractions, each in [0, 1] where 1.0 is optimal.
///
/// The first nine metrics carry aggregation weights; `hba1c` is exposed for
/// breakdown display and drives the diabetes-risk recommendation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    pub bmi: f64,
    pub heart_rate: f64,
    pub sleep: f64,
    pub exercise: f64,
    pub smoking: f64,
    pub alcohol: f64,
    pub chronic_conditions: f64,
    pub stress: f64,
    pub blood_pressure: f64,
    pub hba1c: f64,
}

/// Output of the normalization stage, consumed by the scorer
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    pub bracket: AgeBracket,
    /// BMI value the normalizer resolved (measured when possible, else supplied)
    pub bmi_value: Option<f64>,
    pub metrics: NormalizedMetrics,
}

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, lower sorts first
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Display label echoed into the recommendation
    pub fn impact_label(&self) -> &'static str {
        match self {
            Priority::High => "High Impact",
            Priority::Medium => "Medium Impact",
            Priority::Low => "Low Impact",
        }
    }
}

/// A single actionable recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub impact: String,
    pub priority: Priority,
}

/// Coarse score band used by dashboard displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of_score(score: u8) -> Self {
        match score {
            80..=100 => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

/// Complete assessment returned by `calculate_fitness_score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessAssessment {
    /// Overall wellness score, 0-100
    pub score: u8,
    pub band: ScoreBand,
    /// Resolved BMI, when computable from the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    pub age_bracket: AgeBracket,
    /// Per-metric breakdown for display
    pub normalized: NormalizedMetrics,
    /// At most five entries, high priority first when truncated
    pub recommendations: Vec<Recommendation>,
}
