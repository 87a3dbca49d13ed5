//! Derived values computed from partially filled answers.
//!
//! Every function returns `None` when the inputs it needs are missing.

use serde::{Deserialize, Serialize};

use crate::domain::{FormData, WorkoutFrequency};

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    Normal,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiCategory {
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

/// BMI from height in centimetres and weight in kilograms.
pub fn bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<Bmi> {
    let height_m = height_cm.filter(|h| *h > 0.0)? / 100.0;
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let value = round1(weight / (height_m * height_m));
    Some(Bmi {
        value,
        category: BmiCategory::classify(value),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightDirection {
    Loss,
    Gain,
    Maintain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeMagnitude {
    Modest,
    Moderate,
    Significant,
    Substantial,
}

impl ChangeMagnitude {
    /// Buckets a percent change; each bound belongs to the next bracket up.
    pub fn classify(percent: f64) -> Self {
        if percent < 5.0 {
            ChangeMagnitude::Modest
        } else if percent < 10.0 {
            ChangeMagnitude::Moderate
        } else if percent < 20.0 {
            ChangeMagnitude::Significant
        } else {
            ChangeMagnitude::Substantial
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightChange {
    pub direction: WeightDirection,
    pub amount: f64,
    pub percent: f64,
    pub magnitude: ChangeMagnitude,
}

/// Change from current to target weight, as a share of the current weight.
/// Both values must be in the same unit.
pub fn weight_change(current: Option<f64>, target: Option<f64>) -> Option<WeightChange> {
    let current = current.filter(|w| *w > 0.0)?;
    let target = target.filter(|w| *w > 0.0)?;
    let delta = target - current;
    let amount = round1(delta.abs());
    let direction = if amount == 0.0 {
        WeightDirection::Maintain
    } else if delta < 0.0 {
        WeightDirection::Loss
    } else {
        WeightDirection::Gain
    };
    let percent = round1(delta.abs() / current * 100.0);
    Some(WeightChange {
        direction,
        amount,
        percent,
        magnitude: ChangeMagnitude::classify(percent),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Average,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn classify(score: f64) -> Self {
        if score >= 4.0 {
            FitnessLevel::Advanced
        } else if score >= 3.5 {
            FitnessLevel::Intermediate
        } else if score >= 2.5 {
            FitnessLevel::Average
        } else {
            FitnessLevel::Beginner
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitnessScore {
    pub score: f64,
    pub level: FitnessLevel,
    pub factors_considered: Vec<&'static str>,
}

/// Averages whichever of the three signals are present.
pub fn fitness_score(
    frequency: Option<WorkoutFrequency>,
    energy_level: Option<u8>,
    breathlessness: Option<u8>,
) -> Option<FitnessScore> {
    let signals = [
        ("workout frequency", frequency.map(|f| f64::from(f.bucket()))),
        ("energy levels", energy_level.map(f64::from)),
        (
            "breathlessness",
            breathlessness.map(|rating| 6.0 - f64::from(rating)),
        ),
    ];

    let mut total = 0.0;
    let mut factors_considered = Vec::new();
    for (name, value) in signals {
        if let Some(value) = value {
            total += value;
            factors_considered.push(name);
        }
    }
    if factors_considered.is_empty() {
        return None;
    }

    let score = round1(total / factors_considered.len() as f64);
    Some(FitnessScore {
        score,
        level: FitnessLevel::classify(score),
        factors_considered,
    })
}

impl FormData {
    pub fn bmi(&self) -> Option<Bmi> {
        bmi(self.height_cm, self.current_weight_kg())
    }

    pub fn weight_change(&self) -> Option<WeightChange> {
        weight_change(self.current_weight, self.target_weight)
    }

    pub fn fitness_score(&self) -> Option<FitnessScore> {
        fitness_score(
            self.workout_frequency,
            self.energy_level,
            self.breathlessness_rating,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WeightUnit;

    #[test]
    fn bmi_rounds_to_one_decimal() {
        let result = bmi(Some(170.0), Some(70.0)).unwrap();
        assert_eq!(result.value, 24.2);
        assert_eq!(result.category, BmiCategory::Normal);
        assert_eq!(result.category.label(), "Normal weight");
    }

    #[test]
    fn bmi_needs_both_inputs() {
        assert!(bmi(None, Some(70.0)).is_none());
        assert!(bmi(Some(170.0), None).is_none());
        assert!(bmi(Some(0.0), Some(70.0)).is_none());
    }

    #[test]
    fn bmi_converts_pounds() {
        let form = FormData {
            height_cm: Some(170.0),
            current_weight: Some(154.3),
            weight_unit: WeightUnit::Lbs,
            ..FormData::default()
        };
        assert_eq!(form.bmi().unwrap().value, 24.2);
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(BmiCategory::classify(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(30.0), BmiCategory::Obese);
    }

    #[test]
    fn five_percent_loss_is_moderate() {
        let change = weight_change(Some(80.0), Some(76.0)).unwrap();
        assert_eq!(change.direction, WeightDirection::Loss);
        assert_eq!(change.amount, 4.0);
        assert_eq!(change.percent, 5.0);
        assert_eq!(change.magnitude, ChangeMagnitude::Moderate);
    }

    #[test]
    fn magnitude_brackets() {
        assert_eq!(ChangeMagnitude::classify(4.9), ChangeMagnitude::Modest);
        assert_eq!(ChangeMagnitude::classify(10.0), ChangeMagnitude::Significant);
        assert_eq!(ChangeMagnitude::classify(16.7), ChangeMagnitude::Significant);
        assert_eq!(ChangeMagnitude::classify(20.0), ChangeMagnitude::Substantial);
    }

    #[test]
    fn gain_and_maintain_directions() {
        let gain = weight_change(Some(60.0), Some(66.0)).unwrap();
        assert_eq!(gain.direction, WeightDirection::Gain);
        assert_eq!(gain.percent, 10.0);
        let same = weight_change(Some(70.0), Some(70.0)).unwrap();
        assert_eq!(same.direction, WeightDirection::Maintain);
        assert_eq!(same.magnitude, ChangeMagnitude::Modest);
        assert!(weight_change(Some(70.0), None).is_none());
    }

    #[test]
    fn energy_only_score_is_average_and_stable() {
        let first = fitness_score(None, Some(3), None).unwrap();
        let second = fitness_score(None, Some(3), None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.score, 3.0);
        assert_eq!(first.level, FitnessLevel::Average);
        assert_eq!(first.factors_considered, vec!["energy levels"]);
    }

    #[test]
    fn score_inverts_breathlessness() {
        let score = fitness_score(Some(WorkoutFrequency::FivePlus), Some(4), Some(2)).unwrap();
        assert_eq!(score.score, 4.3);
        assert_eq!(score.level, FitnessLevel::Advanced);
        assert_eq!(
            score.factors_considered,
            vec!["workout frequency", "energy levels", "breathlessness"]
        );
    }

    #[test]
    fn score_without_signals_is_absent() {
        assert!(fitness_score(None, None, None).is_none());
        assert_eq!(FitnessLevel::classify(2.4), FitnessLevel::Beginner);
        assert_eq!(FitnessLevel::classify(3.5), FitnessLevel::Intermediate);
    }
}
