//! Clinical reference tables and scoring constants
//!
//! All tables here are read-only process constants, indexed by
//! `AgeBracket::index()`. Nothing in this module is ever mutated at runtime,
//! which is what makes concurrent calls into the engine safe without
//! synchronization.

use crate::types::Gender;

/// An optimal value with a tolerance half-width for deviation scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBand {
    pub optimal: f64,
    pub range: f64,
}

/// Paired systolic/diastolic reference bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpRangeBand {
    pub systolic: RangeBand,
    pub diastolic: RangeBand,
}

/// BMI reference bands per age bracket (40-49 through 80+)
pub const BMI_BANDS: [RangeBand; 5] = [
    RangeBand { optimal: 22.0, range: 3.5 },
    RangeBand { optimal: 23.0, range: 3.5 },
    RangeBand { optimal: 24.0, range: 4.0 },
    RangeBand { optimal: 25.0, range: 4.0 },
    RangeBand { optimal: 25.5, range: 4.5 },
];

/// Resting heart rate reference bands (bpm) per age bracket
pub const HEART_RATE_BANDS: [RangeBand; 5] = [
    RangeBand { optimal: 62.0, range: 12.0 },
    RangeBand { optimal: 64.0, range: 12.0 },
    RangeBand { optimal: 66.0, range: 14.0 },
    RangeBand { optimal: 68.0, range: 14.0 },
    RangeBand { optimal: 70.0, range: 15.0 },
];

/// HbA1c reference bands (percent) per age bracket
pub const HBA1C_BANDS: [RangeBand; 5] = [
    RangeBand { optimal: 5.2, range: 0.8 },
    RangeBand { optimal: 5.4, range: 0.8 },
    RangeBand { optimal: 5.6, range: 0.9 },
    RangeBand { optimal: 5.8, range: 1.0 },
    RangeBand { optimal: 6.0, range: 1.1 },
];

/// Blood pressure reference bands (mmHg) per age bracket
pub const BLOOD_PRESSURE_BANDS: [BpRangeBand; 5] = [
    BpRangeBand {
        systolic: RangeBand { optimal: 115.0, range: 15.0 },
        diastolic: RangeBand { optimal: 75.0, range: 10.0 },
    },
    BpRangeBand {
        systolic: RangeBand { optimal: 120.0, range: 15.0 },
        diastolic: RangeBand { optimal: 78.0, range: 10.0 },
    },
    BpRangeBand {
        systolic: RangeBand { optimal: 125.0, range: 18.0 },
        diastolic: RangeBand { optimal: 80.0, range: 12.0 },
    },
    BpRangeBand {
        systolic: RangeBand { optimal: 130.0, range: 20.0 },
        diastolic: RangeBand { optimal: 82.0, range: 12.0 },
    },
    BpRangeBand {
        systolic: RangeBand { optimal: 135.0, range: 20.0 },
        diastolic: RangeBand { optimal: 84.0, range: 12.0 },
    },
];

/// Weekly moderate-activity targets (minutes) per age bracket
pub const EXERCISE_TARGET_MINUTES: [u32; 5] = [150, 140, 130, 120, 100];

/// Neutral fraction for absent optional clinical metrics
pub const NEUTRAL_FRACTION: f64 = 0.7;

/// Deviation tier boundaries, as fractions of a band's `range`
pub const DEVIATION_STEPS: [f64; 6] = [0.2, 0.4, 0.6, 0.8, 1.0, 1.5];

/// Tier scores for BMI deviation-banded scoring
pub const BMI_TIER_SCORES: [f64; 7] = [1.0, 0.85, 0.8, 0.7, 0.6, 0.4, 0.2];

/// Tier scores for heart rate, blood pressure, and HbA1c deviation scoring
pub const CLINICAL_TIER_SCORES: [f64; 7] = [1.0, 0.8, 0.75, 0.6, 0.5, 0.4, 0.2];

/// Healthy BMI band for the linear-clamp strategy, senior population (65+)
pub const SENIOR_BMI_BAND: (f64, f64) = (22.0, 27.0);

/// Healthy BMI band for the linear-clamp strategy, under 65
pub const ADULT_BMI_BAND: (f64, f64) = (18.5, 24.9);

// Unit conversions applied at the schema boundary
pub const CM_PER_INCH: f64 = 2.54;
pub const KG_PER_POUND: f64 = 0.453592;
pub const METERS_PER_INCH: f64 = 0.0254;

/// Per-metric aggregation weights. Each vector sums to 1.0 over exactly the
/// nine weighted metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightVector {
    pub bmi: f64,
    pub heart_rate: f64,
    pub sleep: f64,
    pub exercise: f64,
    pub smoking: f64,
    pub alcohol: f64,
    pub chronic_conditions: f64,
    pub stress: f64,
    pub blood_pressure: f64,
}

impl WeightVector {
    pub fn sum(&self) -> f64 {
        self.bmi
            + self.heart_rate
            + self.sleep
            + self.exercise
            + self.smoking
            + self.alcohol
            + self.chronic_conditions
            + self.stress
            + self.blood_pressure
    }
}

/// Weight vector for male and other respondents
pub const DEFAULT_WEIGHTS: WeightVector = WeightVector {
    bmi: 0.15,
    heart_rate: 0.10,
    sleep: 0.15,
    exercise: 0.15,
    smoking: 0.10,
    alcohol: 0.05,
    chronic_conditions: 0.15,
    stress: 0.05,
    blood_pressure: 0.10,
};

/// Weight vector for female respondents. Smoking and alcohol weights are
/// intentionally softened relative to the default vector, with the difference
/// redistributed to sleep, stress, chronic conditions, and blood pressure.
pub const FEMALE_WEIGHTS: WeightVector = WeightVector {
    bmi: 0.15,
    heart_rate: 0.10,
    sleep: 0.18,
    exercise: 0.15,
    smoking: 0.04,
    alcohol: 0.02,
    chronic_conditions: 0.16,
    stress: 0.08,
    blood_pressure: 0.12,
};

/// Select the weight vector for a respondent's gender
pub fn weights_for(gender: Gender) -> &'static WeightVector {
    match gender {
        Gender::Female => &FEMALE_WEIGHTS,
        Gender::Male | Gender::Other => &DEFAULT_WEIGHTS,
    }
}

/// Thresholds used by the recommendation rules, evaluated against raw inputs
pub mod thresholds {
    /// Age at which the senior-specific rules apply
    pub const SENIOR_AGE: u32 = 65;

    /// Age-conditioned ideal BMI for recommendation purposes
    pub const IDEAL_BMI_SENIOR: f64 = 24.0;
    pub const IDEAL_BMI_ADULT: f64 = 22.0;

    /// BMI deviation bands: "very off" vs "moderately off"
    pub const BMI_DEVIATION_HIGH: f64 = 5.0;
    pub const BMI_DEVIATION_MODERATE: f64 = 2.5;

    /// Absolute weekly exercise floor, independent of bracket target
    pub const EXERCISE_FLOOR_MINUTES: u32 = 100;

    /// Weekly units above which alcohol intake is flagged
    pub const ALCOHOL_HIGH_UNITS: u32 = 14;

    /// Resting heart rate bounds (bpm)
    pub const HEART_RATE_LOW: u32 = 60;
    pub const HEART_RATE_HIGH: u32 = 80;

    /// Blood pressure limits (mmHg), age-conditioned on the systolic side
    pub const BP_AGE_SPLIT: u32 = 70;
    pub const BP_SYSTOLIC_LIMIT_UNDER_70: u32 = 140;
    pub const BP_SYSTOLIC_LIMIT_70_PLUS: u32 = 150;
    pub const BP_DIASTOLIC_LIMIT: u32 = 90;

    /// HbA1c limits (percent), age-conditioned
    pub const HBA1C_LIMIT_UNDER_65: f64 = 5.7;
    pub const HBA1C_LIMIT_UNDER_75: f64 = 6.0;
    pub const HBA1C_LIMIT_75_PLUS: f64 = 6.2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_vectors_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < 1e-9);
        assert!((FEMALE_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_for_gender() {
        assert_eq!(weights_for(Gender::Female), &FEMALE_WEIGHTS);
        assert_eq!(weights_for(Gender::Male), &DEFAULT_WEIGHTS);
        assert_eq!(weights_for(Gender::Other), &DEFAULT_WEIGHTS);
    }

    #[test]
    fn test_tier_tables_are_aligned() {
        // One score per step boundary plus the beyond-last-step tier
        assert_eq!(BMI_TIER_SCORES.len(), DEVIATION_STEPS.len() + 1);
        assert_eq!(CLINICAL_TIER_SCORES.len(), DEVIATION_STEPS.len() + 1);
    }

    #[test]
    fn test_exercise_targets_decrease_with_age() {
        for pair in EXERCISE_TARGET_MINUTES.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }
}
