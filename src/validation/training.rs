use super::{first_failure, require, require_selection, ValidationOutcome};
use crate::domain::FormData;

/// Steps 12-16: location, equipment, exercise preferences, schedule,
/// activities.
pub(super) fn check(offset: usize, form: &FormData) -> Option<ValidationOutcome> {
    let outcome = match offset {
        0 => require(&form.workout_location, "Please select where you work out."),
        1 => require(
            &form.equipment_access,
            "Please tell us what equipment you can use.",
        ),
        2 => {
            if form.exercise_preferences.is_empty() {
                ValidationOutcome::fail("Rate at least one exercise.")
            } else {
                ValidationOutcome::pass()
            }
        }
        3 => first_failure([
            require(&form.workout_intensity, "Please select a workout intensity."),
            require(&form.workout_frequency, "Please select how often you train."),
            require(&form.workout_duration, "Please select a session length."),
        ]),
        4 => require_selection(
            &form.activities,
            form.custom_activity.as_ref(),
            "Select an activity, add your own, or choose none.",
        ),
        _ => return None,
    };
    Some(outcome)
}
