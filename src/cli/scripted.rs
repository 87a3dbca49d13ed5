//! Non-interactive front end that answers each step from a prepared record.

use std::collections::BTreeSet;

use crate::cli::interaction::{PromptResponse, StepContext, SurveyInteraction};
use crate::domain::{selection, FormData};
use crate::survey::Step;

/// Replays answers from a JSON-loaded [`FormData`], one step at a time.
///
/// A step that comes back with a recorded error after it was already
/// answered cannot be fixed without new input, so the run is cancelled and
/// the failure kept for reporting.
pub struct ScriptedInteraction {
    answers: FormData,
    answered: BTreeSet<usize>,
    failure: Option<(usize, String)>,
}

impl ScriptedInteraction {
    pub fn new(answers: FormData) -> Self {
        Self {
            answers,
            answered: BTreeSet::new(),
            failure: None,
        }
    }

    /// Step and message that stopped the run, if any.
    pub fn failure(&self) -> Option<(usize, &str)> {
        self.failure
            .as_ref()
            .map(|(step, message)| (*step, message.as_str()))
    }
}

impl SurveyInteraction for ScriptedInteraction {
    fn prompt_step(&mut self, context: &StepContext<'_>, form: &mut FormData) -> PromptResponse {
        if let Some(error) = context.error {
            if self.answered.contains(&context.number) {
                self.failure = Some((context.number, error.to_string()));
                return PromptResponse::Cancel;
            }
        }
        copy_step(context.step, &self.answers, form);
        self.answered.insert(context.number);
        PromptResponse::Answered {
            auto_advance: false,
        }
    }

    fn report_blocked(&mut self, step: Step, message: &str) {
        tracing::debug!(step = step.number(), %message, "scripted answer rejected");
    }

    fn report_deferred(&mut self, step: Step, message: &str) {
        tracing::warn!(step = step.number(), %message, "scripted answer accepted with error");
    }
}

/// Copies the fields a step owns from `from` into `to`.
pub fn copy_step(step: Step, from: &FormData, to: &mut FormData) {
    match step {
        Step::Gender => to.gender = from.gender,
        Step::Age => to.age_range = from.age_range,
        Step::BodyType => to.body_type = from.body_type,
        Step::FitnessGoal => to.fitness_goal = from.fitness_goal,
        Step::DesiredBody => to.desired_body = from.desired_body,
        Step::ProblemAreas => {
            to.problem_areas = selection::normalize(from.problem_areas.clone());
        }
        Step::BestShape => to.best_shape = from.best_shape,
        Step::WeightPattern => to.weight_change_pattern = from.weight_change_pattern,
        Step::Height => to.height_cm = from.height_cm,
        Step::Weight => {
            to.weight_unit = from.weight_unit;
            to.current_weight = from.current_weight;
            to.target_weight = from.target_weight;
        }
        Step::BodyFat => {
            to.current_body_fat = from.current_body_fat;
            to.target_body_fat = from.target_body_fat;
        }
        Step::WorkoutLocation => to.workout_location = from.workout_location,
        Step::Equipment => {
            to.equipment_access = from.equipment_access;
            to.equipment_items = from.equipment_items.clone();
        }
        Step::ExercisePreferences => {
            to.exercise_preferences = from.exercise_preferences.clone();
        }
        Step::WorkoutSchedule => {
            to.workout_intensity = from.workout_intensity;
            to.workout_frequency = from.workout_frequency;
            to.workout_duration = from.workout_duration;
        }
        Step::Activities => {
            to.activities = selection::normalize(from.activities.clone());
            to.custom_activity = from.custom_activity.clone();
        }
        Step::HealthConcerns => {
            to.health_concerns = selection::normalize(from.health_concerns.clone());
            to.custom_health_concern = from.custom_health_concern.clone();
        }
        Step::Allergies => {
            to.allergies = selection::normalize(from.allergies.clone());
            to.custom_allergy = from.custom_allergy.clone();
        }
        Step::Diet => {
            to.diet_foods = selection::normalize(from.diet_foods.clone());
            to.custom_diet_food = from.custom_diet_food.clone();
        }
        Step::SugaryFoods => to.sugary_food_frequency = from.sugary_food_frequency,
        Step::WaterIntake => to.water_intake_ml = from.water_intake_ml,
        Step::Sleep => to.sleep_hours = from.sleep_hours,
        Step::EnergyLevel => to.energy_level = from.energy_level,
        Step::Breathlessness => to.breathlessness_rating = from.breathlessness_rating,
        Step::HabitRelapse => to.habit_relapse_rating = from.habit_relapse_rating,
        Step::WorkoutSuitability => {
            to.workout_suitability_rating = from.workout_suitability_rating
        }
        Step::Motivation => to.motivation_rating = from.motivation_rating,
        Step::DietConsistency => to.diet_consistency_rating = from.diet_consistency_rating,
        Step::StartCommitment => to.start_commitment = from.start_commitment,
        Step::Contact => {
            to.name = from.name.clone();
            to.email = from.email.clone();
            to.marketing_consent = from.marketing_consent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::runner::{RunOutcome, SurveyRunner};
    use crate::domain::{Allergy, ProblemArea};
    use crate::test_support::complete_form;
    use crate::validation::ValidationMode;

    #[test]
    fn copying_every_step_rebuilds_the_record() {
        let source = complete_form();
        let mut target = FormData::new();
        for step in Step::ORDER {
            copy_step(step, &source, &mut target);
        }
        assert_eq!(target, source);
    }

    #[test]
    fn complete_answers_run_to_completion() {
        let mut scripted = ScriptedInteraction::new(complete_form());
        let outcome = SurveyRunner::new(ValidationMode::Strict).run(&mut scripted);
        assert_eq!(outcome, RunOutcome::Completed(complete_form()));
        assert!(scripted.failure().is_none());
    }

    #[test]
    fn invalid_answer_stops_a_strict_run() {
        let mut answers = complete_form();
        answers.email = Some("not-an-email".into());
        let mut scripted = ScriptedInteraction::new(answers);
        let outcome = SurveyRunner::new(ValidationMode::Strict).run(&mut scripted);
        assert!(matches!(outcome, RunOutcome::Abandoned { step: 30, .. }));
        let (step, _) = scripted.failure().unwrap();
        assert_eq!(step, 30);
    }

    #[test]
    fn none_in_a_scripted_list_clears_the_other_picks() {
        let mut answers = complete_form();
        answers.problem_areas = vec![ProblemArea::None, ProblemArea::Arms];
        answers.allergies = vec![Allergy::Nuts, Allergy::None];
        let mut scripted = ScriptedInteraction::new(answers);

        let RunOutcome::Completed(form) = SurveyRunner::new(ValidationMode::Strict).run(&mut scripted)
        else {
            panic!("scripted run should complete");
        };
        assert_eq!(form.problem_areas, vec![ProblemArea::None]);
        assert_eq!(form.allergies, vec![Allergy::None]);
    }

    #[test]
    fn resumed_run_still_collects_the_earlier_steps() {
        let mut scripted = ScriptedInteraction::new(complete_form());
        let outcome = SurveyRunner::new(ValidationMode::Strict)
            .starting_at(12)
            .run(&mut scripted);
        assert_eq!(outcome, RunOutcome::Completed(complete_form()));
        assert!(scripted.failure().is_none());
    }
}
