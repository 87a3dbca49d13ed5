//! The fixed, ordered list of survey screens.
//!
//! Every respondent sees every step in this order; there is no branching on
//! previous answers.

use std::fmt;
use std::ops::RangeInclusive;

/// Number of screens in the survey.
pub const TOTAL_STEPS: usize = 30;

/// Contiguous groups of steps, each validated by its own sub-validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepRange {
    Profile,
    Body,
    Training,
    Lifestyle,
    Assessment,
}

impl StepRange {
    pub const ALL: [StepRange; 5] = [
        StepRange::Profile,
        StepRange::Body,
        StepRange::Training,
        StepRange::Lifestyle,
        StepRange::Assessment,
    ];

    /// 1-based step numbers covered by the range.
    pub fn numbers(self) -> RangeInclusive<usize> {
        match self {
            StepRange::Profile => 1..=5,
            StepRange::Body => 6..=11,
            StepRange::Training => 12..=16,
            StepRange::Lifestyle => 17..=23,
            StepRange::Assessment => 24..=30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StepRange::Profile => "About you",
            StepRange::Body => "Your body",
            StepRange::Training => "Training",
            StepRange::Lifestyle => "Lifestyle",
            StepRange::Assessment => "Self-assessment",
        }
    }

    /// Finds the range and zero-based local offset of a step number.
    pub fn locate(number: usize) -> Option<(StepRange, usize)> {
        StepRange::ALL.iter().find_map(|range| {
            let numbers = range.numbers();
            if numbers.contains(&number) {
                Some((*range, number - numbers.start()))
            } else {
                None
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Gender,
    Age,
    BodyType,
    FitnessGoal,
    DesiredBody,
    ProblemAreas,
    BestShape,
    WeightPattern,
    Height,
    Weight,
    BodyFat,
    WorkoutLocation,
    Equipment,
    ExercisePreferences,
    WorkoutSchedule,
    Activities,
    HealthConcerns,
    Allergies,
    Diet,
    SugaryFoods,
    WaterIntake,
    Sleep,
    EnergyLevel,
    Breathlessness,
    HabitRelapse,
    WorkoutSuitability,
    Motivation,
    DietConsistency,
    StartCommitment,
    Contact,
}

impl Step {
    pub const ORDER: [Step; TOTAL_STEPS] = [
        Step::Gender,
        Step::Age,
        Step::BodyType,
        Step::FitnessGoal,
        Step::DesiredBody,
        Step::ProblemAreas,
        Step::BestShape,
        Step::WeightPattern,
        Step::Height,
        Step::Weight,
        Step::BodyFat,
        Step::WorkoutLocation,
        Step::Equipment,
        Step::ExercisePreferences,
        Step::WorkoutSchedule,
        Step::Activities,
        Step::HealthConcerns,
        Step::Allergies,
        Step::Diet,
        Step::SugaryFoods,
        Step::WaterIntake,
        Step::Sleep,
        Step::EnergyLevel,
        Step::Breathlessness,
        Step::HabitRelapse,
        Step::WorkoutSuitability,
        Step::Motivation,
        Step::DietConsistency,
        Step::StartCommitment,
        Step::Contact,
    ];

    pub fn from_number(number: usize) -> Option<Step> {
        number
            .checked_sub(1)
            .and_then(|index| Step::ORDER.get(index).copied())
    }

    /// 1-based position in the survey.
    pub fn number(self) -> usize {
        Step::ORDER
            .iter()
            .position(|step| *step == self)
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    pub fn range(self) -> StepRange {
        StepRange::locate(self.number())
            .map(|(range, _)| range)
            .unwrap_or(StepRange::Assessment)
    }

    /// Single-choice screens advance on their own shortly after a selection.
    /// These are also the screens that tolerate deferred validation.
    pub fn auto_advances(self) -> bool {
        matches!(
            self,
            Step::Gender
                | Step::Age
                | Step::BodyType
                | Step::FitnessGoal
                | Step::DesiredBody
                | Step::BestShape
                | Step::WeightPattern
                | Step::WorkoutLocation
                | Step::SugaryFoods
                | Step::Sleep
                | Step::EnergyLevel
                | Step::Breathlessness
                | Step::HabitRelapse
                | Step::WorkoutSuitability
                | Step::Motivation
                | Step::DietConsistency
                | Step::StartCommitment
        )
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Gender => "What is your gender?",
            Step::Age => "What is your age?",
            Step::BodyType => "Which body type describes you best?",
            Step::FitnessGoal => "What is your main goal?",
            Step::DesiredBody => "What body do you want?",
            Step::ProblemAreas => "Which areas would you like to focus on?",
            Step::BestShape => "When were you last in the best shape of your life?",
            Step::WeightPattern => "How does your weight usually change?",
            Step::Height => "How tall are you?",
            Step::Weight => "What are your current and target weights?",
            Step::BodyFat => "What are your current and target body fat levels?",
            Step::WorkoutLocation => "Where do you prefer to work out?",
            Step::Equipment => "What equipment do you have access to?",
            Step::ExercisePreferences => "How do you feel about these exercises?",
            Step::WorkoutSchedule => "How would you like to train?",
            Step::Activities => "Which activities do you enjoy?",
            Step::HealthConcerns => "Do you have any health concerns?",
            Step::Allergies => "Do you have any food allergies?",
            Step::Diet => "Which foods do you usually eat?",
            Step::SugaryFoods => "How often do you eat sugary foods?",
            Step::WaterIntake => "How much water do you drink a day?",
            Step::Sleep => "How much do you usually sleep?",
            Step::EnergyLevel => "How would you rate your energy during the day?",
            Step::Breathlessness => "I get out of breath climbing a few flights of stairs",
            Step::HabitRelapse => "I often fall back into old habits",
            Step::WorkoutSuitability => "I struggle to find workouts that suit me",
            Step::Motivation => "I lose motivation quickly",
            Step::DietConsistency => "I find it hard to stick to a diet",
            Step::StartCommitment => "When would you like to start?",
            Step::Contact => "Where should we send your plan?",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), TOTAL_STEPS, self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_one_based_and_contiguous() {
        for (index, step) in Step::ORDER.iter().enumerate() {
            assert_eq!(step.number(), index + 1);
            assert_eq!(Step::from_number(index + 1), Some(*step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(TOTAL_STEPS + 1), None);
    }

    #[test]
    fn ranges_cover_every_step_once() {
        let covered: usize = StepRange::ALL.iter().map(|r| r.numbers().count()).sum();
        assert_eq!(covered, TOTAL_STEPS);
        for number in 1..=TOTAL_STEPS {
            assert!(StepRange::locate(number).is_some(), "step {number} uncovered");
        }
    }

    #[test]
    fn locate_returns_local_offset() {
        assert_eq!(StepRange::locate(1), Some((StepRange::Profile, 0)));
        assert_eq!(StepRange::locate(6), Some((StepRange::Body, 0)));
        assert_eq!(StepRange::locate(16), Some((StepRange::Training, 4)));
        assert_eq!(StepRange::locate(30), Some((StepRange::Assessment, 6)));
        assert_eq!(StepRange::locate(31), None);
        assert_eq!(Step::Weight.range(), StepRange::Body);
    }

    #[test]
    fn multi_input_steps_never_auto_advance() {
        assert!(!Step::ProblemAreas.auto_advances());
        assert!(!Step::Weight.auto_advances());
        assert!(!Step::Contact.auto_advances());
        assert!(Step::Age.auto_advances());
    }
}
