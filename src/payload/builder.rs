use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metrics::{BmiCategory, ChangeMagnitude, FitnessLevel, WeightDirection};
use crate::checkout::{Plan, PlanSource};
use crate::domain::{
    Activity, AgeRange, Allergy, BestShape, BodyType, Choice, DesiredBody, DietFood,
    EquipmentAccess, FitnessGoal, FormData, Gender, HealthConcern, ProblemArea, SleepHours,
    StartCommitment, SugaryFoodFrequency, WeightChangePattern, WeightUnit, WorkoutDuration,
    WorkoutFrequency, WorkoutIntensity, WorkoutLocation,
};

pub const DEFAULT_SOURCE: &str = "fitness-assessment";

/// Submission details that do not come from the answers themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadContext {
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub plan: Option<Plan>,
    pub plan_source: Option<PlanSource>,
    pub source: String,
}

impl PayloadContext {
    pub fn new(plan: Option<Plan>) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            plan,
            plan_source: None,
            source: DEFAULT_SOURCE.to_string(),
        }
    }

    pub fn with_plan_source(mut self, source: PlanSource) -> Self {
        self.plan_source = Some(source);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// JSON body POSTed to the plan-generation webhooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPayload {
    pub metadata: Metadata,
    pub demographics: Demographics,
    pub body_profile: BodyProfile,
    pub health_status: HealthStatus,
    pub activity_profile: ActivityProfile,
    pub lifestyle: Lifestyle,
    pub self_assessments: SelfAssessments,
    pub program_timing: ProgramTiming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub submission_id: Uuid,
    pub submitted_at: String,
    pub plan: Option<Plan>,
    pub plan_source: Option<PlanSource>,
    pub source: String,
    pub form_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub name: Option<String>,
    pub email: Option<String>,
    pub marketing_consent: bool,
    pub gender: Option<Gender>,
    pub age_range: Option<AgeRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyProfile {
    pub height_cm: Option<f64>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub weight_unit: WeightUnit,
    pub current_weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub current_body_fat: Option<f64>,
    pub target_body_fat: Option<f64>,
    pub body_type: Option<BodyType>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub problem_areas: Vec<ProblemArea>,
    pub goal_metrics: GoalMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalMetrics {
    pub fitness_goal: Option<FitnessGoal>,
    pub desired_body: Option<DesiredBody>,
    pub weight_change_direction: Option<WeightDirection>,
    pub weight_change_amount: Option<f64>,
    pub weight_change_percent: Option<f64>,
    pub weight_change_magnitude: Option<ChangeMagnitude>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub health_concerns: Vec<HealthConcern>,
    pub custom_health_concern: Option<String>,
    pub allergies: Vec<Allergy>,
    pub custom_allergy: Option<String>,
    pub has_restrictions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityProfile {
    pub workout_location: Option<WorkoutLocation>,
    pub workout_intensity: Option<WorkoutIntensity>,
    pub workout_frequency: Option<WorkoutFrequency>,
    pub workout_duration: Option<WorkoutDuration>,
    pub equipment_access: Option<EquipmentAccess>,
    pub equipment_items: Vec<String>,
    pub exercise_preferences: BTreeMap<String, String>,
    pub activities: Vec<Activity>,
    pub custom_activity: Option<String>,
    pub fitness_score: Option<f64>,
    pub fitness_level: Option<FitnessLevel>,
    pub factors_considered: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifestyle {
    pub diet_foods: Vec<DietFood>,
    pub custom_diet_food: Option<String>,
    pub sugary_food_frequency: Option<SugaryFoodFrequency>,
    pub water_intake_ml: Option<u32>,
    pub sleep_hours: Option<SleepHours>,
    pub energy_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfAssessments {
    pub breathlessness: Option<u8>,
    pub habit_relapse: Option<u8>,
    pub workout_suitability: Option<u8>,
    pub motivation: Option<u8>,
    pub diet_consistency: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramTiming {
    pub start_commitment: Option<StartCommitment>,
    pub best_shape: Option<BestShape>,
    pub weight_change_pattern: Option<WeightChangePattern>,
}

/// Assembles the outbound payload. Pure apart from the values already fixed
/// in `context`.
pub fn build_payload(form: &FormData, context: &PayloadContext) -> AssessmentPayload {
    let bmi = form.bmi();
    let change = form.weight_change();
    let fitness = form.fitness_score();

    AssessmentPayload {
        metadata: Metadata {
            submission_id: context.submission_id,
            submitted_at: context
                .submitted_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            plan: context.plan,
            plan_source: context.plan_source,
            source: context.source.clone(),
            form_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        demographics: Demographics {
            name: form.name.clone(),
            email: form.email.as_deref().map(|email| email.trim().to_string()),
            marketing_consent: form.marketing_consent,
            gender: form.gender,
            age_range: form.age_range,
        },
        body_profile: BodyProfile {
            height_cm: form.height_cm,
            current_weight: form.current_weight,
            target_weight: form.target_weight,
            weight_unit: form.weight_unit,
            current_weight_kg: form.current_weight_kg().map(super::metrics::round1),
            target_weight_kg: form.target_weight_kg().map(super::metrics::round1),
            current_body_fat: form.current_body_fat,
            target_body_fat: form.target_body_fat,
            body_type: form.body_type,
            bmi: bmi.map(|b| b.value),
            bmi_category: bmi.map(|b| b.category),
            problem_areas: form.problem_areas.clone(),
            goal_metrics: GoalMetrics {
                fitness_goal: form.fitness_goal,
                desired_body: form.desired_body,
                weight_change_direction: change.map(|c| c.direction),
                weight_change_amount: change.map(|c| c.amount),
                weight_change_percent: change.map(|c| c.percent),
                weight_change_magnitude: change.map(|c| c.magnitude),
            },
        },
        health_status: HealthStatus {
            health_concerns: form.health_concerns.clone(),
            custom_health_concern: form.custom_health_concern.clone(),
            allergies: form.allergies.clone(),
            custom_allergy: form.custom_allergy.clone(),
            has_restrictions: has_real_selection(&form.health_concerns)
                || has_real_selection(&form.allergies)
                || form.custom_health_concern.is_some()
                || form.custom_allergy.is_some(),
        },
        activity_profile: ActivityProfile {
            workout_location: form.workout_location,
            workout_intensity: form.workout_intensity,
            workout_frequency: form.workout_frequency,
            workout_duration: form.workout_duration,
            equipment_access: form.equipment_access,
            equipment_items: form.equipment_items.clone(),
            exercise_preferences: form
                .exercise_preferences
                .iter()
                .map(|(exercise, preference)| {
                    (exercise.code().to_string(), preference.code().to_string())
                })
                .collect(),
            activities: form.activities.clone(),
            custom_activity: form.custom_activity.clone(),
            fitness_score: fitness.as_ref().map(|f| f.score),
            fitness_level: fitness.as_ref().map(|f| f.level),
            factors_considered: fitness
                .map(|f| f.factors_considered.iter().map(|s| s.to_string()).collect())
                .unwrap_or_default(),
        },
        lifestyle: Lifestyle {
            diet_foods: form.diet_foods.clone(),
            custom_diet_food: form.custom_diet_food.clone(),
            sugary_food_frequency: form.sugary_food_frequency,
            water_intake_ml: form.water_intake_ml,
            sleep_hours: form.sleep_hours,
            energy_level: form.energy_level,
        },
        self_assessments: SelfAssessments {
            breathlessness: form.breathlessness_rating,
            habit_relapse: form.habit_relapse_rating,
            workout_suitability: form.workout_suitability_rating,
            motivation: form.motivation_rating,
            diet_consistency: form.diet_consistency_rating,
        },
        program_timing: ProgramTiming {
            start_commitment: form.start_commitment,
            best_shape: form.best_shape,
            weight_change_pattern: form.weight_change_pattern,
        },
    }
}

fn has_real_selection<T: Choice>(items: &[T]) -> bool {
    items.iter().any(|item| !item.is_none_sentinel())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::complete_form;

    fn fixed_context() -> PayloadContext {
        PayloadContext {
            submission_id: Uuid::nil(),
            submitted_at: DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            plan: Some(Plan::Combined),
            plan_source: Some(PlanSource::Snapshot),
            source: DEFAULT_SOURCE.into(),
        }
    }

    #[test]
    fn goal_metrics_classify_a_fifteen_kilo_loss() {
        let payload = build_payload(&complete_form(), &fixed_context());
        let json = serde_json::to_value(&payload).unwrap();
        let goals = &json["bodyProfile"]["goalMetrics"];
        assert_eq!(goals["weightChangeDirection"], "loss");
        assert_eq!(goals["weightChangeMagnitude"], "significant");
        assert_eq!(goals["weightChangeAmount"], 15.0);
        assert_eq!(goals["weightChangePercent"], 16.7);
        assert_eq!(json["demographics"]["ageRange"], "18-29");
        assert_eq!(json["bodyProfile"]["bodyType"], "mesomorph");
    }

    #[test]
    fn sections_use_camel_case_keys() {
        let payload = build_payload(&complete_form(), &fixed_context());
        let json = serde_json::to_value(&payload).unwrap();
        for section in [
            "metadata",
            "demographics",
            "bodyProfile",
            "healthStatus",
            "activityProfile",
            "lifestyle",
            "selfAssessments",
            "programTiming",
        ] {
            assert!(json.get(section).is_some(), "missing section {section}");
        }
        assert_eq!(json["metadata"]["submittedAt"], "2024-03-01T10:00:00Z");
        assert_eq!(json["metadata"]["plan"], "combined");
        assert_eq!(json["metadata"]["planSource"], "snapshot");
        assert_eq!(json["activityProfile"]["exercisePreferences"]["squats"], "like");
        assert_eq!(json["bodyProfile"]["bmi"], 27.8);
        assert_eq!(json["bodyProfile"]["bmiCategory"], "Overweight");
    }

    #[test]
    fn empty_form_yields_nulls_not_panics() {
        let payload = build_payload(&FormData::default(), &PayloadContext::new(None));
        assert_eq!(payload.body_profile.bmi, None);
        assert_eq!(payload.body_profile.goal_metrics.weight_change_direction, None);
        assert_eq!(payload.activity_profile.fitness_score, None);
        assert!(payload.activity_profile.factors_considered.is_empty());
        assert!(!payload.health_status.has_restrictions);
        assert_eq!(payload.metadata.plan, None);
    }

    #[test]
    fn none_sentinel_is_not_a_restriction() {
        let mut form = complete_form();
        assert!(!build_payload(&form, &fixed_context()).health_status.has_restrictions);
        form.allergies = vec![Allergy::Nuts];
        assert!(build_payload(&form, &fixed_context()).health_status.has_restrictions);
    }
}
