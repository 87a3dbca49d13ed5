use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::options::{
    Activity, AgeRange, Allergy, BestShape, BodyType, DesiredBody, DietFood, EquipmentAccess,
    Exercise, FitnessGoal, Gender, HealthConcern, Preference, ProblemArea, SleepHours,
    StartCommitment, SugaryFoodFrequency, WeightChangePattern, WeightUnit, WorkoutDuration,
    WorkoutFrequency, WorkoutIntensity, WorkoutLocation,
};
use super::selection;

/// Every answer collected across the survey.
///
/// Fields stay empty until their step is visited. The record is mutated in
/// place by the step prompts and read in full once at submission time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub marketing_consent: bool,

    pub gender: Option<Gender>,
    pub age_range: Option<AgeRange>,

    pub height_cm: Option<f64>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub weight_unit: WeightUnit,
    pub current_body_fat: Option<f64>,
    pub target_body_fat: Option<f64>,
    pub body_type: Option<BodyType>,

    pub fitness_goal: Option<FitnessGoal>,
    pub desired_body: Option<DesiredBody>,
    pub problem_areas: Vec<ProblemArea>,
    pub best_shape: Option<BestShape>,
    pub weight_change_pattern: Option<WeightChangePattern>,
    pub start_commitment: Option<StartCommitment>,

    pub workout_location: Option<WorkoutLocation>,
    pub workout_intensity: Option<WorkoutIntensity>,
    pub workout_frequency: Option<WorkoutFrequency>,
    pub workout_duration: Option<WorkoutDuration>,
    pub equipment_access: Option<EquipmentAccess>,
    pub equipment_items: Vec<String>,
    pub exercise_preferences: BTreeMap<Exercise, Preference>,

    pub activities: Vec<Activity>,
    pub custom_activity: Option<String>,
    pub health_concerns: Vec<HealthConcern>,
    pub custom_health_concern: Option<String>,
    pub allergies: Vec<Allergy>,
    pub custom_allergy: Option<String>,
    pub diet_foods: Vec<DietFood>,
    pub custom_diet_food: Option<String>,
    pub sugary_food_frequency: Option<SugaryFoodFrequency>,
    pub water_intake_ml: Option<u32>,
    pub sleep_hours: Option<SleepHours>,
    pub energy_level: Option<u8>,

    pub breathlessness_rating: Option<u8>,
    pub habit_relapse_rating: Option<u8>,
    pub workout_suitability_rating: Option<u8>,
    pub motivation_rating: Option<u8>,
    pub diet_consistency_rating: Option<u8>,
}

impl Default for WeightUnit {
    fn default() -> Self {
        WeightUnit::Kg
    }
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current weight converted to kilograms.
    pub fn current_weight_kg(&self) -> Option<f64> {
        self.current_weight.map(|value| to_kg(value, self.weight_unit))
    }

    /// Target weight converted to kilograms.
    pub fn target_weight_kg(&self) -> Option<f64> {
        self.target_weight.map(|value| to_kg(value, self.weight_unit))
    }

    /// Applies the "none" rule to every multi-select list, whichever front
    /// end filled them.
    pub fn normalize_selections(&mut self) {
        self.problem_areas = selection::normalize(std::mem::take(&mut self.problem_areas));
        self.activities = selection::normalize(std::mem::take(&mut self.activities));
        self.health_concerns = selection::normalize(std::mem::take(&mut self.health_concerns));
        self.allergies = selection::normalize(std::mem::take(&mut self.allergies));
        self.diet_foods = selection::normalize(std::mem::take(&mut self.diet_foods));
    }
}

const LBS_TO_KG: f64 = 0.453_592_37;

pub fn to_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => value,
        WeightUnit::Lbs => value * LBS_TO_KG,
    }
}

/// Normalises free-text answers, treating blank input as absent.
pub fn clean_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_empty() {
        let form = FormData::new();
        assert!(form.gender.is_none());
        assert!(form.problem_areas.is_empty());
        assert_eq!(form.weight_unit, WeightUnit::Kg);
        assert!(!form.marketing_consent);
    }

    #[test]
    fn pounds_convert_to_kilograms() {
        let form = FormData {
            current_weight: Some(200.0),
            weight_unit: WeightUnit::Lbs,
            ..FormData::default()
        };
        let kg = form.current_weight_kg().unwrap();
        assert!((kg - 90.718).abs() < 0.01);
    }

    #[test]
    fn partial_json_deserialises_with_defaults() {
        let form: FormData =
            serde_json::from_str(r#"{"ageRange":"18-29","bodyType":"mesomorph"}"#).unwrap();
        assert_eq!(form.age_range, Some(AgeRange::From18To29));
        assert_eq!(form.body_type, Some(BodyType::Mesomorph));
        assert!(form.email.is_none());
    }

    #[test]
    fn clean_text_drops_blank_values() {
        assert_eq!(clean_text("   "), None);
        assert_eq!(clean_text(" Ana "), Some("Ana".to_string()));
    }

    #[test]
    fn normalizing_collapses_lists_that_contain_none() {
        let mut form = FormData {
            problem_areas: vec![ProblemArea::None, ProblemArea::Arms],
            allergies: vec![Allergy::Nuts, Allergy::None],
            health_concerns: vec![HealthConcern::None],
            ..FormData::default()
        };
        form.normalize_selections();
        assert_eq!(form.problem_areas, vec![ProblemArea::None]);
        assert_eq!(form.allergies, vec![Allergy::None]);
        assert_eq!(form.health_concerns, vec![HealthConcern::None]);
        assert!(form.activities.is_empty());
    }
}
