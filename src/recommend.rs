//! Recommendation generation
//!
//! Evaluates threshold rules against the raw profile (not the normalized
//! fractions) and emits a prioritized, capped list of recommendations. Rules
//! whose inputs are absent are skipped; there are no failure modes.

use crate::normalizer::measured_bmi;
use crate::reference::thresholds::*;
use crate::reference::EXERCISE_TARGET_MINUTES;
use crate::types::{AgeBracket, HealthProfile, Priority, Recommendation, SmokingStatus, StressLevel};

/// Maximum number of recommendations returned
pub const MAX_RECOMMENDATIONS: usize = 5;

pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Evaluate every rule in fixed order and apply the ordering/cap
    /// invariant: five or fewer triggered rules are returned in evaluation
    /// order; more than five are stable-sorted by priority and truncated.
    pub fn generate(profile: &HealthProfile) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        let age = profile.age;

        // 1. BMI distance from the age-conditioned ideal
        if let Some(bmi) = resolve_bmi(profile) {
            let ideal = if age >= SENIOR_AGE {
                IDEAL_BMI_SENIOR
            } else {
                IDEAL_BMI_ADULT
            };
            let deviation = (bmi - ideal).abs();
            if deviation >= BMI_DEVIATION_HIGH {
                push(
                    &mut recommendations,
                    "Your BMI is well outside the healthy range for your age; discuss a weight management plan with your physician.",
                    Priority::High,
                );
            } else if deviation >= BMI_DEVIATION_MODERATE {
                push(
                    &mut recommendations,
                    "Your BMI is drifting from the ideal for your age; modest diet adjustments can bring it back.",
                    Priority::Medium,
                );
            }
        }

        // 2. Weekly exercise, with an absolute floor below the bracket target
        let target = EXERCISE_TARGET_MINUTES[AgeBracket::of(age).index()];
        if profile.exercise_minutes < EXERCISE_FLOOR_MINUTES {
            push(
                &mut recommendations,
                "Increase your weekly exercise; even short daily walks count toward your activity target.",
                Priority::High,
            );
        } else if profile.exercise_minutes < target {
            push(
                &mut recommendations,
                "You are close to your weekly exercise target; one extra session would get you there.",
                Priority::Medium,
            );
        }

        // 3. Sleep quality
        if !profile.good_sleep_quality {
            push(
                &mut recommendations,
                "Improve sleep hygiene: keep a consistent bedtime and limit screens in the evening.",
                Priority::Medium,
            );
        }

        // 4. Smoking
        if profile.smoking_status == SmokingStatus::Current {
            push(
                &mut recommendations,
                "Quitting smoking is the single most effective step you can take for your health.",
                Priority::High,
            );
        }

        // 5. Alcohol
        if profile.alcohol_units > ALCOHOL_HIGH_UNITS {
            push(
                &mut recommendations,
                "Reduce alcohol intake to at most 14 standard units per week.",
                Priority::High,
            );
        }

        // 6. Stress
        match profile.stress_level {
            Some(StressLevel::High) => push(
                &mut recommendations,
                "Your stress level is high; consider relaxation techniques or speaking with a counselor.",
                Priority::High,
            ),
            Some(StressLevel::Mild) => push(
                &mut recommendations,
                "Mild stress noted; regular light exercise and social activity can help.",
                Priority::Low,
            ),
            _ => {}
        }

        // 7. Resting heart rate
        if let Some(bpm) = profile.resting_heart_rate {
            if bpm < HEART_RATE_LOW || bpm > HEART_RATE_HIGH {
                push(
                    &mut recommendations,
                    "Your resting heart rate is outside the typical range; mention it at your next checkup.",
                    Priority::Medium,
                );
            }
        }

        // 8. Blood pressure, age-conditioned on the systolic limit
        if let (Some(systolic), Some(diastolic)) = (profile.systolic_bp, profile.diastolic_bp) {
            let systolic_limit = if age < BP_AGE_SPLIT {
                BP_SYSTOLIC_LIMIT_UNDER_70
            } else {
                BP_SYSTOLIC_LIMIT_70_PLUS
            };
            if systolic > systolic_limit || diastolic > BP_DIASTOLIC_LIMIT {
                push(
                    &mut recommendations,
                    "Your blood pressure is above the recommended limit for your age; schedule a review with your doctor.",
                    Priority::High,
                );
            }
        }

        // 9. HbA1c, age-conditioned threshold
        if let Some(hba1c) = profile.hba1c_percent {
            let limit = if age < 65 {
                HBA1C_LIMIT_UNDER_65
            } else if age < 75 {
                HBA1C_LIMIT_UNDER_75
            } else {
                HBA1C_LIMIT_75_PLUS
            };
            if hba1c > limit {
                push(
                    &mut recommendations,
                    "Your HbA1c is elevated for your age; ask your doctor about blood sugar management.",
                    Priority::High,
                );
            }
        }

        // 10. Routine checkups for seniors
        if age >= SENIOR_AGE {
            push(
                &mut recommendations,
                "Schedule regular health checkups; annual reviews are recommended from age 65.",
                Priority::Low,
            );
        }

        if recommendations.len() > MAX_RECOMMENDATIONS {
            recommendations.sort_by_key(|r| r.priority.rank());
            recommendations.truncate(MAX_RECOMMENDATIONS);
        }

        recommendations
    }
}

/// BMI for rule evaluation: measured when computable, else the supplied value
fn resolve_bmi(profile: &HealthProfile) -> Option<f64> {
    match (profile.height_cm, profile.weight_kg) {
        (Some(height), Some(weight)) => measured_bmi(height, weight, true).ok(),
        _ => profile.bmi,
    }
}

fn push(recommendations: &mut Vec<Recommendation>, text: &str, priority: Priority) {
    recommendations.push(Recommendation {
        text: text.to_string(),
        impact: priority.impact_label().to_string(),
        priority,
    });
}
