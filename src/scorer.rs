//! Weighted aggregation
//!
//! Combines the nine weighted metric fractions into a single 0-100 score
//! using the gender-conditioned weight vector.

use crate::reference::weights_for;
use crate::types::{Gender, NormalizedMetrics};

pub struct Scorer;

impl Scorer {
    /// Aggregate normalized fractions into an integer score.
    ///
    /// The weights sum to 1.0 over fractions in [0, 1], so the result stays
    /// in range before the clamp.
    pub fn aggregate(metrics: &NormalizedMetrics, gender: Gender) -> u8 {
        let weights = weights_for(gender);

        let total = metrics.bmi * weights.bmi
            + metrics.heart_rate * weights.heart_rate
            + metrics.sleep * weights.sleep
            + metrics.exercise * weights.exercise
            + metrics.smoking * weights.smoking
            + metrics.alcohol * weights.alcohol
            + metrics.chronic_conditions * weights.chronic_conditions
            + metrics.stress * weights.stress
            + metrics.blood_pressure * weights.blood_pressure;

        (total * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
