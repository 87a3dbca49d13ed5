use super::{require, require_rating, require_selection, ValidationOutcome};
use crate::domain::FormData;

const MAX_WATER_ML: u32 = 10_000;

/// Steps 17-23: health concerns, allergies, diet, sugar, water, sleep,
/// energy.
pub(super) fn check(offset: usize, form: &FormData) -> Option<ValidationOutcome> {
    let outcome = match offset {
        0 => require_selection(
            &form.health_concerns,
            form.custom_health_concern.as_ref(),
            "Select any health concerns, or choose none.",
        ),
        1 => require_selection(
            &form.allergies,
            form.custom_allergy.as_ref(),
            "Select any allergies, or choose none.",
        ),
        2 => require_selection(
            &form.diet_foods,
            form.custom_diet_food.as_ref(),
            "Select at least one food you eat.",
        ),
        3 => require(
            &form.sugary_food_frequency,
            "Please tell us how often you eat sugary foods.",
        ),
        4 => match form.water_intake_ml {
            Some(ml) if ml > 0 && ml <= MAX_WATER_ML => ValidationOutcome::pass(),
            Some(_) => ValidationOutcome::fail("Please enter a realistic daily water intake."),
            None => ValidationOutcome::fail("Please tell us how much water you drink."),
        },
        5 => require(&form.sleep_hours, "Please select how much you sleep."),
        6 => require_rating(form.energy_level, "Please rate your energy from 1 to 5."),
        _ => return None,
    };
    Some(outcome)
}
