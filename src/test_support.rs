//! Fixtures shared by unit tests across modules.

use crate::domain::{
    Activity, AgeRange, Allergy, BestShape, BodyType, DesiredBody, DietFood, EquipmentAccess,
    Exercise, FitnessGoal, FormData, Gender, HealthConcern, Preference, ProblemArea, SleepHours,
    StartCommitment, SugaryFoodFrequency, WeightChangePattern, WeightUnit, WorkoutDuration,
    WorkoutFrequency, WorkoutIntensity, WorkoutLocation,
};

/// A record that passes validation at every step.
pub fn complete_form() -> FormData {
    let mut form = FormData {
        name: Some("Ana".into()),
        email: Some("ana@example.com".into()),
        marketing_consent: true,
        gender: Some(Gender::Female),
        age_range: Some(AgeRange::From18To29),
        height_cm: Some(180.0),
        current_weight: Some(90.0),
        target_weight: Some(75.0),
        weight_unit: WeightUnit::Kg,
        current_body_fat: Some(25.0),
        target_body_fat: Some(18.0),
        body_type: Some(BodyType::Mesomorph),
        fitness_goal: Some(FitnessGoal::LoseWeight),
        desired_body: Some(DesiredBody::Toned),
        problem_areas: vec![ProblemArea::Belly, ProblemArea::Arms],
        best_shape: Some(BestShape::OneToThreeYears),
        weight_change_pattern: Some(WeightChangePattern::GainFastLoseSlow),
        start_commitment: Some(StartCommitment::ThisWeek),
        workout_location: Some(WorkoutLocation::Home),
        workout_intensity: Some(WorkoutIntensity::Moderate),
        workout_frequency: Some(WorkoutFrequency::ThreeTimes),
        workout_duration: Some(WorkoutDuration::Medium),
        equipment_access: Some(EquipmentAccess::Basic),
        equipment_items: vec!["Dumbbells".into()],
        activities: vec![Activity::Walking, Activity::Yoga],
        health_concerns: vec![HealthConcern::None],
        allergies: vec![Allergy::None],
        diet_foods: vec![DietFood::Chicken, DietFood::Vegetables],
        sugary_food_frequency: Some(SugaryFoodFrequency::FewTimesWeek),
        water_intake_ml: Some(2000),
        sleep_hours: Some(SleepHours::SevenToEight),
        energy_level: Some(3),
        breathlessness_rating: Some(3),
        habit_relapse_rating: Some(4),
        workout_suitability_rating: Some(2),
        motivation_rating: Some(3),
        diet_consistency_rating: Some(4),
        ..FormData::default()
    };
    form.exercise_preferences
        .insert(Exercise::Squats, Preference::Like);
    form.exercise_preferences
        .insert(Exercise::Burpees, Preference::Dislike);
    form
}
