//! Terminal front end built on dialoguer.

use std::str::FromStr;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::cli::interaction::{PromptResponse, StepContext, SurveyInteraction};
use crate::cli::output;
use crate::domain::{clean_text, selection, Choice, EquipmentAccess, Exercise, FormData};
use crate::survey::Step;

const HELP_ITEM: &str = "(help)";

const ENERGY_LABELS: [&str; 5] = [
    "1 - Very low",
    "2 - Low",
    "3 - Average",
    "4 - High",
    "5 - Very high",
];

const AGREEMENT_LABELS: [&str; 5] = [
    "1 - Strongly disagree",
    "2 - Disagree",
    "3 - Neutral",
    "4 - Agree",
    "5 - Strongly agree",
];

enum Answer<T> {
    Value(T),
    Back,
    Help,
}

type Prompted<T> = Result<Answer<T>, dialoguer::Error>;

macro_rules! answer {
    ($prompt:expr) => {
        match $prompt? {
            Answer::Value(value) => value,
            Answer::Back => return Ok(Answer::Back),
            Answer::Help => return Ok(Answer::Help),
        }
    };
}

/// Interactive prompts for a real terminal. Esc on a list goes back one step.
pub struct TerminalInteraction {
    theme: ColorfulTheme,
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn choose_one<T: Choice>(&self, prompt: &str, current: Option<T>) -> Prompted<T> {
        let options = T::all();
        let mut items: Vec<&str> = options.iter().map(|option| option.label()).collect();
        items.push(HELP_ITEM);
        let default = current
            .and_then(|value| options.iter().position(|option| *option == value))
            .unwrap_or(0);

        let picked = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items.as_slice())
            .default(default)
            .interact_opt()?;
        Ok(match picked {
            None => Answer::Back,
            Some(index) if index < options.len() => Answer::Value(options[index]),
            Some(_) => Answer::Help,
        })
    }

    fn choose_many<T: Choice>(&self, prompt: &str, current: &[T]) -> Prompted<Vec<T>> {
        let options = T::all();
        let items: Vec<&str> = options.iter().map(|option| option.label()).collect();
        let defaults: Vec<bool> = options
            .iter()
            .map(|option| current.contains(option))
            .collect();

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
            .items(items.as_slice())
            .defaults(&defaults)
            .interact_opt()?;
        Ok(match picked {
            None => Answer::Back,
            Some(indices) => {
                let chosen = indices.into_iter().map(|index| options[index]).collect();
                Answer::Value(selection::normalize(chosen))
            }
        })
    }

    fn rating(&self, prompt: &str, labels: &[&str; 5], current: Option<u8>) -> Prompted<u8> {
        let mut items: Vec<&str> = labels.to_vec();
        items.push(HELP_ITEM);
        let default = current
            .map(|value| usize::from(value.clamp(1, 5)) - 1)
            .unwrap_or(2);

        let picked = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items.as_slice())
            .default(default)
            .interact_opt()?;
        Ok(match picked {
            None => Answer::Back,
            Some(index) if index < labels.len() => Answer::Value(index as u8 + 1),
            Some(_) => Answer::Help,
        })
    }

    fn text(&self, prompt: &str, current: Option<&str>) -> Result<Option<String>, dialoguer::Error> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(current) = current {
            input = input.with_initial_text(current);
        }
        Ok(clean_text(&input.interact_text()?))
    }

    fn number<N>(&self, prompt: &str, current: Option<N>) -> Result<Option<N>, dialoguer::Error>
    where
        N: FromStr + ToString,
    {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|value: &String| -> Result<(), &str> {
                let trimmed = value.trim();
                if trimmed.is_empty() || trimmed.parse::<N>().is_ok() {
                    Ok(())
                } else {
                    Err("Please enter a number")
                }
            });
        if let Some(current) = current {
            input = input.with_initial_text(current.to_string());
        }
        let raw = input.interact_text()?;
        Ok(raw.trim().parse::<N>().ok())
    }

    fn ask(&self, step: Step, form: &mut FormData) -> Prompted<()> {
        let title = step.title();
        match step {
            Step::Gender => form.gender = Some(answer!(self.choose_one(title, form.gender))),
            Step::Age => form.age_range = Some(answer!(self.choose_one(title, form.age_range))),
            Step::BodyType => {
                form.body_type = Some(answer!(self.choose_one(title, form.body_type)))
            }
            Step::FitnessGoal => {
                form.fitness_goal = Some(answer!(self.choose_one(title, form.fitness_goal)))
            }
            Step::DesiredBody => {
                form.desired_body = Some(answer!(self.choose_one(title, form.desired_body)))
            }
            Step::ProblemAreas => {
                form.problem_areas = answer!(self.choose_many(title, &form.problem_areas))
            }
            Step::BestShape => {
                form.best_shape = Some(answer!(self.choose_one(title, form.best_shape)))
            }
            Step::WeightPattern => {
                form.weight_change_pattern =
                    Some(answer!(self.choose_one(title, form.weight_change_pattern)))
            }
            Step::Height => form.height_cm = self.number("Height (cm)", form.height_cm)?,
            Step::Weight => {
                form.weight_unit = answer!(self.choose_one("Unit", Some(form.weight_unit)));
                let unit = form.weight_unit.code();
                form.current_weight =
                    self.number(&format!("Current weight ({unit})"), form.current_weight)?;
                form.target_weight =
                    self.number(&format!("Target weight ({unit})"), form.target_weight)?;
            }
            Step::BodyFat => {
                form.current_body_fat =
                    self.number("Current body fat (%)", form.current_body_fat)?;
                form.target_body_fat = self.number("Target body fat (%)", form.target_body_fat)?;
            }
            Step::WorkoutLocation => {
                form.workout_location =
                    Some(answer!(self.choose_one(title, form.workout_location)))
            }
            Step::Equipment => {
                let access = answer!(self.choose_one(title, form.equipment_access));
                form.equipment_access = Some(access);
                form.equipment_items = if access == EquipmentAccess::None {
                    Vec::new()
                } else {
                    let current = form.equipment_items.join(", ");
                    self.text("Which items? (comma separated)", Some(&current))?
                        .map(|list| list.split(',').filter_map(clean_text).collect())
                        .unwrap_or_default()
                };
            }
            Step::ExercisePreferences => {
                output::info(title);
                for exercise in Exercise::all() {
                    let current = form.exercise_preferences.get(exercise).copied();
                    let preference = answer!(self.choose_one(exercise.label(), current));
                    form.exercise_preferences.insert(*exercise, preference);
                }
            }
            Step::WorkoutSchedule => {
                form.workout_intensity =
                    Some(answer!(self.choose_one("Intensity", form.workout_intensity)));
                form.workout_frequency =
                    Some(answer!(self.choose_one("Frequency", form.workout_frequency)));
                form.workout_duration =
                    Some(answer!(self.choose_one("Session length", form.workout_duration)));
            }
            Step::Activities => {
                form.activities = answer!(self.choose_many(title, &form.activities));
                form.custom_activity =
                    self.text("Anything else? (optional)", form.custom_activity.as_deref())?;
            }
            Step::HealthConcerns => {
                form.health_concerns = answer!(self.choose_many(title, &form.health_concerns));
                form.custom_health_concern = self.text(
                    "Anything else? (optional)",
                    form.custom_health_concern.as_deref(),
                )?;
            }
            Step::Allergies => {
                form.allergies = answer!(self.choose_many(title, &form.allergies));
                form.custom_allergy =
                    self.text("Anything else? (optional)", form.custom_allergy.as_deref())?;
            }
            Step::Diet => {
                form.diet_foods = answer!(self.choose_many(title, &form.diet_foods));
                form.custom_diet_food =
                    self.text("Anything else? (optional)", form.custom_diet_food.as_deref())?;
            }
            Step::SugaryFoods => {
                form.sugary_food_frequency =
                    Some(answer!(self.choose_one(title, form.sugary_food_frequency)))
            }
            Step::WaterIntake => {
                form.water_intake_ml = self.number("Water per day (ml)", form.water_intake_ml)?
            }
            Step::Sleep => {
                form.sleep_hours = Some(answer!(self.choose_one(title, form.sleep_hours)))
            }
            Step::EnergyLevel => {
                form.energy_level =
                    Some(answer!(self.rating(title, &ENERGY_LABELS, form.energy_level)))
            }
            Step::Breathlessness => {
                form.breathlessness_rating = Some(answer!(self.rating(
                    title,
                    &AGREEMENT_LABELS,
                    form.breathlessness_rating
                )))
            }
            Step::HabitRelapse => {
                form.habit_relapse_rating = Some(answer!(self.rating(
                    title,
                    &AGREEMENT_LABELS,
                    form.habit_relapse_rating
                )))
            }
            Step::WorkoutSuitability => {
                form.workout_suitability_rating = Some(answer!(self.rating(
                    title,
                    &AGREEMENT_LABELS,
                    form.workout_suitability_rating
                )))
            }
            Step::Motivation => {
                form.motivation_rating = Some(answer!(self.rating(
                    title,
                    &AGREEMENT_LABELS,
                    form.motivation_rating
                )))
            }
            Step::DietConsistency => {
                form.diet_consistency_rating = Some(answer!(self.rating(
                    title,
                    &AGREEMENT_LABELS,
                    form.diet_consistency_rating
                )))
            }
            Step::StartCommitment => {
                form.start_commitment =
                    Some(answer!(self.choose_one(title, form.start_commitment)))
            }
            Step::Contact => {
                form.name = self.text("Your name", form.name.as_deref())?;
                form.email = self.text("Your email", form.email.as_deref())?;
                let consent = Confirm::with_theme(&self.theme)
                    .with_prompt("Send me tips and offers by email")
                    .default(form.marketing_consent)
                    .interact_opt()?;
                match consent {
                    Some(consent) => form.marketing_consent = consent,
                    None => return Ok(Answer::Back),
                }
            }
        }
        Ok(Answer::Value(()))
    }
}

impl SurveyInteraction for TerminalInteraction {
    fn prompt_step(&mut self, context: &StepContext<'_>, form: &mut FormData) -> PromptResponse {
        output::section(format!(
            "{} ({}/{})",
            context.step.range().label(),
            context.number,
            context.total
        ));
        if let Some(error) = context.error {
            output::warning(error);
        }

        match self.ask(context.step, form) {
            Ok(Answer::Value(())) => PromptResponse::Answered {
                auto_advance: context.step.auto_advances(),
            },
            Ok(Answer::Back) => PromptResponse::Back,
            Ok(Answer::Help) => PromptResponse::Help,
            Err(err) => {
                tracing::error!(step = context.number, error = %err, "terminal prompt failed");
                PromptResponse::Cancel
            }
        }
    }
}
