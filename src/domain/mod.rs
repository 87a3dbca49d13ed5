pub mod form_data;
pub mod options;
pub mod selection;

pub use form_data::{clean_text, to_kg, FormData};
pub use options::{
    Activity, AgeRange, Allergy, BestShape, BodyType, Choice, DesiredBody, DietFood,
    EquipmentAccess, Exercise, FitnessGoal, Gender, HealthConcern, Preference, ProblemArea,
    SleepHours, StartCommitment, SugaryFoodFrequency, WeightChangePattern, WeightUnit,
    WorkoutDuration, WorkoutFrequency, WorkoutIntensity, WorkoutLocation,
};
