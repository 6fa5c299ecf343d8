//! Per-metric normalization
//!
//! Each normalizer converts one raw health metric into a wellness fraction in
//! [0, 1], using the age bracket's reference band where the metric is
//! age-conditioned. Absent optional metrics resolve to the neutral fraction
//! rather than zero. Out-of-domain values (negative bpm, absurd HbA1c) are not
//! rejected here; they fall into the lowest deviation tiers instead.

use crate::error::ScoreError;
use crate::reference::{
    ADULT_BMI_BAND, BLOOD_PRESSURE_BANDS, BMI_BANDS, BMI_TIER_SCORES, CLINICAL_TIER_SCORES,
    CM_PER_INCH, DEVIATION_STEPS, EXERCISE_TARGET_MINUTES, HBA1C_BANDS, HEART_RATE_BANDS,
    KG_PER_POUND, NEUTRAL_FRACTION, SENIOR_BMI_BAND,
};
use crate::reference::thresholds::SENIOR_AGE;
use crate::types::{
    AgeBracket, ChronicConditions, HealthProfile, NormalizedMetrics, NormalizedProfile,
    SmokingStatus, StressLevel,
};

/// Compute BMI from measured height and weight.
///
/// Imperial inputs (inches, pounds) are converted to metric first. Fails with
/// `ScoreError::InvalidBiometric` when either measurement is nonpositive:
/// that is a caller contract violation, not a recoverable condition.
pub fn measured_bmi(height: f64, weight: f64, is_metric: bool) -> Result<f64, ScoreError> {
    if height <= 0.0 || weight <= 0.0 {
        return Err(ScoreError::InvalidBiometric(format!(
            "height and weight must be positive, got height={height}, weight={weight}"
        )));
    }

    let (height_cm, weight_kg) = if is_metric {
        (height, weight)
    } else {
        (height * CM_PER_INCH, weight * KG_PER_POUND)
    };

    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Direct linear-clamp BMI strategy.
///
/// Uses the senior-specific healthy band [22, 27] at age 65 and above, and
/// the general adult band [18.5, 24.9] below. The fraction is the position of
/// the computed BMI within the band, clamped to [0, 1]. This is the primary
/// strategy whenever measured height and weight are available.
pub fn normalize_bmi_measured(
    height: f64,
    weight: f64,
    is_metric: bool,
    age: u32,
) -> Result<f64, ScoreError> {
    let bmi = measured_bmi(height, weight, is_metric)?;
    let (min, max) = if age >= SENIOR_AGE {
        SENIOR_BMI_BAND
    } else {
        ADULT_BMI_BAND
    };
    Ok(((bmi - min) / (max - min)).clamp(0.0, 1.0))
}

/// Deviation-banded BMI strategy, used when the caller supplies a precomputed
/// BMI with no measured height and weight.
pub fn normalize_bmi_banded(bmi: f64, age: u32) -> f64 {
    let band = BMI_BANDS[AgeBracket::of(age).index()];
    deviation_score((bmi - band.optimal).abs(), band.range, &BMI_TIER_SCORES)
}

/// Map an absolute deviation into a discrete tier score.
///
/// Tier boundaries are fractions of the band's tolerance `range`; deviations
/// beyond the last boundary land in the final tier.
fn deviation_score(deviation: f64, range: f64, tier_scores: &[f64; 7]) -> f64 {
    for (step, score) in DEVIATION_STEPS.iter().zip(tier_scores.iter()) {
        if deviation <= step * range {
            return *score;
        }
    }
    tier_scores[6]
}

/// Normalize resting heart rate (bpm). Absent readings score neutral.
pub fn normalize_heart_rate(bpm: Option<u32>, age: u32) -> f64 {
    match bpm {
        Some(bpm) => {
            let band = HEART_RATE_BANDS[AgeBracket::of(age).index()];
            deviation_score(
                (bpm as f64 - band.optimal).abs(),
                band.range,
                &CLINICAL_TIER_SCORES,
            )
        }
        None => NEUTRAL_FRACTION,
    }
}

/// Normalize blood pressure. Systolic and diastolic are scored independently
/// and averaged. A lone component is treated the same as an absent reading.
pub fn normalize_blood_pressure(systolic: Option<u32>, diastolic: Option<u32>, age: u32) -> f64 {
    match (systolic, diastolic) {
        (Some(sys), Some(dia)) => {
            let band = BLOOD_PRESSURE_BANDS[AgeBracket::of(age).index()];
            let sys_score = deviation_score(
                (sys as f64 - band.systolic.optimal).abs(),
                band.systolic.range,
                &CLINICAL_TIER_SCORES,
            );
            let dia_score = deviation_score(
                (dia as f64 - band.diastolic.optimal).abs(),
                band.diastolic.range,
                &CLINICAL_TIER_SCORES,
            );
            (sys_score + dia_score) / 2.0
        }
        _ => NEUTRAL_FRACTION,
    }
}

/// Normalize HbA1c (percent). Absent readings score neutral.
pub fn normalize_hba1c(percent: Option<f64>, age: u32) -> f64 {
    match percent {
        Some(value) => {
            let band = HBA1C_BANDS[AgeBracket::of(age).index()];
            deviation_score(
                (value - band.optimal).abs(),
                band.range,
                &CLINICAL_TIER_SCORES,
            )
        }
        None => NEUTRAL_FRACTION,
    }
}

/// Sleep quality is a coarse boolean: good sleep scores 1.0, poor sleep 0.4
pub fn normalize_sleep(good_quality: bool) -> f64 {
    if good_quality {
        1.0
    } else {
        0.4
    }
}

/// Normalize weekly exercise minutes against the bracket's target
pub fn normalize_exercise(minutes: u32, age: u32) -> f64 {
    let target = EXERCISE_TARGET_MINUTES[AgeBracket::of(age).index()];
    let percent_of_target = minutes as f64 / target as f64 * 100.0;

    if percent_of_target >= 100.0 {
        1.0
    } else if percent_of_target >= 80.0 {
        0.8
    } else if percent_of_target >= 60.0 {
        0.6
    } else if percent_of_target >= 40.0 {
        0.4
    } else if percent_of_target >= 20.0 {
        0.3
    } else {
        0.1
    }
}

pub fn normalize_smoking(status: SmokingStatus) -> f64 {
    match status {
        SmokingStatus::Never => 1.0,
        SmokingStatus::Former => 0.7,
        SmokingStatus::Current => 0.3,
    }
}

/// Normalize weekly standard drink units
pub fn normalize_alcohol(units: u32) -> f64 {
    match units {
        0 => 1.0,
        1..=7 => 0.9,
        8..=14 => 0.75,
        15..=21 => 0.5,
        _ => 0.3,
    }
}

/// Normalize stress level. An unreported level scores neutral, not zero.
pub fn normalize_stress(level: Option<StressLevel>) -> f64 {
    match level {
        Some(StressLevel::None) => 1.0,
        Some(StressLevel::Mild) => 0.5,
        Some(StressLevel::High) => 0.0,
        None => NEUTRAL_FRACTION,
    }
}

/// Normalize chronic condition severities. An absent record means no tracked
/// conditions and scores 1.0.
pub fn normalize_chronic(conditions: Option<&ChronicConditions>) -> f64 {
    match conditions {
        Some(conditions) => 1.0 - conditions.severity_mean() / 100.0,
        None => 1.0,
    }
}

/// Normalizer for converting a health profile into per-metric fractions
pub struct Normalizer;

impl Normalizer {
    /// Normalize every metric of a profile.
    ///
    /// The only failure path is the biometric positivity check: measured
    /// height and weight, when both present, take precedence over a supplied
    /// `bmi` and must be positive.
    pub fn normalize(profile: &HealthProfile) -> Result<NormalizedProfile, ScoreError> {
        let bracket = AgeBracket::of(profile.age);

        let (bmi_value, bmi_fraction) = match (profile.height_cm, profile.weight_kg) {
            (Some(height), Some(weight)) => {
                let bmi = measured_bmi(height, weight, true)?;
                let fraction = normalize_bmi_measured(height, weight, true, profile.age)?;
                (Some(bmi), fraction)
            }
            _ => match profile.bmi {
                Some(bmi) => (Some(bmi), normalize_bmi_banded(bmi, profile.age)),
                None => (None, NEUTRAL_FRACTION),
            },
        };

        let metrics = NormalizedMetrics {
            bmi: bmi_fraction,
            heart_rate: normalize_heart_rate(profile.resting_heart_rate, profile.age),
            sleep: normalize_sleep(profile.good_sleep_quality),
            exercise: normalize_exercise(profile.exercise_minutes, profile.age),
            smoking: normalize_smoking(profile.smoking_status),
            alcohol: normalize_alcohol(profile.alcohol_units),
            chronic_conditions: normalize_chronic(profile.chronic_conditions.as_ref()),
            stress: normalize_stress(profile.stress_level),
            blood_pressure: normalize_blood_pressure(
                profile.systolic_bp,
                profile.diastolic_bp,
                profile.age,
            ),
            hba1c: normalize_hba1c(profile.hba1c_percent, profile.age),
        };

        Ok(NormalizedProfile {
            bracket,
            bmi_value,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_measured_bmi_metric() {
        let bmi = measured_bmi(170.0, 70.0, true).unwrap();
        assert!((bmi - 24.221).abs() < 0.01);
    }

    #[test]
    fn test_measured_bmi_imperial_conversion() {
        // 67 in = 170.18 cm, 154 lb = 69.85 kg
        let bmi = measured_bmi(67.0, 154.0, false).unwrap();
        let metric = measured_bmi(170.18, 69.85, true).unwrap();
        assert!((bmi - metric).abs() < 0.01);
    }

    #[test]
    fn test_measured_bmi_rejects_nonpositive() {
        assert!(matches!(
            measured_bmi(0.0, 70.0, true),
            Err(ScoreError::InvalidBiometric(_))
        ));
        assert!(matches!(
            measured_bmi(170.0, -1.0, true),
            Err(ScoreError::InvalidBiometric(_))
        ));
    }

    #[test]
    fn test_bmi_linear_clamp_senior_band() {
        // BMI 24.5 at age 68 sits halfway into the [22, 27] senior band
        let fraction = normalize_bmi_measured(165.7, 67.3, true, 68).unwrap();
        let bmi = measured_bmi(165.7, 67.3, true).unwrap();
        let expected = ((bmi - 22.0) / 5.0).clamp(0.0, 1.0);
        assert!(approx(fraction, expected));
    }

    #[test]
    fn test_bmi_linear_clamp_saturates() {
        // Very high BMI clamps to 1.0, very low clamps to 0.0
        assert!(approx(normalize_bmi_measured(150.0, 90.0, true, 70).unwrap(), 1.0));
        assert!(approx(normalize_bmi_measured(190.0, 55.0, true, 70).unwrap(), 0.0));
    }

    #[test]
    fn test_bmi_banded_tiers() {
        // Bracket 60-69: optimal 24.0, range 4.0
        assert!(approx(normalize_bmi_banded(24.0, 65), 1.0)); // dev 0
        assert!(approx(normalize_bmi_banded(25.2, 65), 0.85)); // dev 1.2 = 30% of range
        assert!(approx(normalize_bmi_banded(26.0, 65), 0.8)); // dev 2.0 = 50%
        assert!(approx(normalize_bmi_banded(27.0, 65), 0.7)); // dev 3.0 = 75%
        assert!(approx(normalize_bmi_banded(28.0, 65), 0.6)); // dev 4.0 = 100%
        assert!(approx(normalize_bmi_banded(29.5, 65), 0.4)); // dev 5.5 = 137.5%
        assert!(approx(normalize_bmi_banded(35.0, 65), 0.2)); // beyond 150%
    }

    #[test]
    fn test_heart_rate_neutral_when_absent() {
        assert!(approx(normalize_heart_rate(None, 70), NEUTRAL_FRACTION));
    }

    #[test]
    fn test_heart_rate_tiers() {
        // Bracket 70-79: optimal 68, range 14
        assert!(approx(normalize_heart_rate(Some(68), 72), 1.0));
        assert!(approx(normalize_heart_rate(Some(76), 72), 0.75)); // dev 8 = 57%
        assert!(approx(normalize_heart_rate(Some(110), 72), 0.2)); // far out
    }

    #[test]
    fn test_blood_pressure_averages_components() {
        // Bracket 60-69: systolic {125, 18}, diastolic {80, 12}
        // Both optimal
        assert!(approx(normalize_blood_pressure(Some(125), Some(80), 65), 1.0));
        // Systolic dev 18 (100% -> 0.5), diastolic optimal (1.0) -> mean 0.75
        assert!(approx(normalize_blood_pressure(Some(143), Some(80), 65), 0.75));
    }

    #[test]
    fn test_blood_pressure_lone_component_is_absent() {
        assert!(approx(
            normalize_blood_pressure(Some(140), None, 65),
            NEUTRAL_FRACTION
        ));
        assert!(approx(
            normalize_blood_pressure(None, Some(90), 65),
            NEUTRAL_FRACTION
        ));
    }

    #[test]
    fn test_hba1c_tiers() {
        // Bracket 60-69: optimal 5.6, range 0.9
        assert!(approx(normalize_hba1c(Some(5.6), 66), 1.0));
        assert!(approx(normalize_hba1c(None, 66), NEUTRAL_FRACTION));
        assert!(approx(normalize_hba1c(Some(9.0), 66), 0.2));
    }

    #[test]
    fn test_sleep() {
        assert!(approx(normalize_sleep(true), 1.0));
        assert!(approx(normalize_sleep(false), 0.4));
    }

    #[test]
    fn test_exercise_tiers() {
        // Bracket 60-69 target is 130 minutes
        assert!(approx(normalize_exercise(130, 65), 1.0));
        assert!(approx(normalize_exercise(110, 65), 0.8)); // 84.6%
        assert!(approx(normalize_exercise(80, 65), 0.6)); // 61.5%
        assert!(approx(normalize_exercise(55, 65), 0.4)); // 42.3%
        assert!(approx(normalize_exercise(30, 65), 0.3)); // 23.1%
        assert!(approx(normalize_exercise(10, 65), 0.1)); // 7.7%
    }

    #[test]
    fn test_exercise_target_is_age_conditioned() {
        // 100 minutes meets the 80+ target but not the 40-49 target
        assert!(approx(normalize_exercise(100, 85), 1.0));
        assert!(approx(normalize_exercise(100, 45), 0.6)); // 66.7% of 150
    }

    #[test]
    fn test_smoking() {
        assert!(approx(normalize_smoking(SmokingStatus::Never), 1.0));
        assert!(approx(normalize_smoking(SmokingStatus::Former), 0.7));
        assert!(approx(normalize_smoking(SmokingStatus::Current), 0.3));
    }

    #[test]
    fn test_alcohol_bands() {
        assert!(approx(normalize_alcohol(0), 1.0));
        assert!(approx(normalize_alcohol(7), 0.9));
        assert!(approx(normalize_alcohol(8), 0.75));
        assert!(approx(normalize_alcohol(14), 0.75));
        assert!(approx(normalize_alcohol(21), 0.5));
        assert!(approx(normalize_alcohol(22), 0.3));
    }

    #[test]
    fn test_stress() {
        assert!(approx(normalize_stress(Some(StressLevel::None)), 1.0));
        assert!(approx(normalize_stress(Some(StressLevel::Mild)), 0.5));
        assert!(approx(normalize_stress(Some(StressLevel::High)), 0.0));
        assert!(approx(normalize_stress(None), NEUTRAL_FRACTION));
    }

    #[test]
    fn test_chronic_conditions() {
        assert!(approx(normalize_chronic(None), 1.0));

        let conditions = ChronicConditions {
            diabetes: 100,
            hypertension: 100,
            heart_related: 100,
            cancer: 100,
            others: 100,
        };
        assert!(approx(normalize_chronic(Some(&conditions)), 0.0));

        let mild = ChronicConditions {
            diabetes: 20,
            hypertension: 30,
            ..Default::default()
        };
        assert!(approx(normalize_chronic(Some(&mild)), 0.9));
    }

    #[test]
    fn test_normalize_prefers_measured_over_supplied_bmi() {
        let profile = HealthProfile {
            height_cm: Some(170.0),
            weight_kg: Some(70.0),
            bmi: Some(26.0),
            ..Default::default()
        };
        let normalized = Normalizer::normalize(&profile).unwrap();

        // Measured BMI is 24.22; age defaults to 65, senior band [22, 27]
        let expected = (24.221_453_287_197_232 - 22.0) / 5.0;
        assert!((normalized.metrics.bmi - expected).abs() < 1e-6);
        assert!((normalized.bmi_value.unwrap() - 24.22).abs() < 0.01);
    }

    #[test]
    fn test_normalize_falls_back_to_supplied_bmi() {
        let profile = HealthProfile {
            bmi: Some(26.0),
            ..Default::default()
        };
        let normalized = Normalizer::normalize(&profile).unwrap();

        // Banded strategy: bracket 60-69, dev 2.0 = 50% of range 4.0
        assert!(approx(normalized.metrics.bmi, 0.8));
        assert_eq!(normalized.bmi_value, Some(26.0));
    }

    #[test]
    fn test_normalize_default_neutrality() {
        let profile = HealthProfile {
            age: 70,
            ..Default::default()
        };
        let normalized = Normalizer::normalize(&profile).unwrap();

        assert!(approx(normalized.metrics.bmi, NEUTRAL_FRACTION));
        assert!(approx(normalized.metrics.heart_rate, NEUTRAL_FRACTION));
        assert!(approx(normalized.metrics.stress, NEUTRAL_FRACTION));
        assert!(approx(normalized.metrics.blood_pressure, NEUTRAL_FRACTION));
        assert!(approx(normalized.metrics.hba1c, NEUTRAL_FRACTION));
        assert!(approx(normalized.metrics.chronic_conditions, 1.0));
    }

    #[test]
    fn test_normalize_propagates_biometric_error() {
        let profile = HealthProfile {
            height_cm: Some(0.0),
            weight_kg: Some(70.0),
            ..Default::default()
        };
        assert!(matches!(
            Normalizer::normalize(&profile),
            Err(ScoreError::InvalidBiometric(_))
        ));
    }
}
