use super::{first_failure, require, require_selection, ValidationOutcome};
use crate::domain::{Choice, FormData, WeightUnit};

const MIN_HEIGHT_CM: f64 = 100.0;
const MAX_HEIGHT_CM: f64 = 250.0;
const MIN_WEIGHT_KG: f64 = 30.0;
const MAX_WEIGHT_KG: f64 = 300.0;
const MIN_BODY_FAT: f64 = 3.0;
const MAX_BODY_FAT: f64 = 60.0;

/// Steps 6-11: problem areas, best shape, weight pattern, height, weight,
/// body fat.
pub(super) fn check(offset: usize, form: &FormData) -> Option<ValidationOutcome> {
    let outcome = match offset {
        0 => require_selection(
            &form.problem_areas,
            None,
            "Select at least one area, or choose none.",
        ),
        1 => require(&form.best_shape, "Please tell us when you were in your best shape."),
        2 => require(
            &form.weight_change_pattern,
            "Please select how your weight usually changes.",
        ),
        3 => check_height(form),
        4 => check_weights(form),
        5 => check_body_fat(form),
        _ => return None,
    };
    Some(outcome)
}

fn check_height(form: &FormData) -> ValidationOutcome {
    match form.height_cm {
        None => ValidationOutcome::fail("Please enter your height."),
        Some(height) if (MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height) => {
            ValidationOutcome::pass()
        }
        Some(_) => ValidationOutcome::fail(format!(
            "Height must be between {MIN_HEIGHT_CM:.0} and {MAX_HEIGHT_CM:.0} cm."
        )),
    }
}

fn check_weights(form: &FormData) -> ValidationOutcome {
    first_failure([
        check_weight(form.current_weight, form.weight_unit, "current"),
        check_weight(form.target_weight, form.weight_unit, "target"),
    ])
}

fn check_weight(value: Option<f64>, unit: WeightUnit, which: &str) -> ValidationOutcome {
    let (min, max) = weight_bounds(unit);
    match value {
        None => ValidationOutcome::fail(format!("Please enter your {which} weight.")),
        Some(weight) if (min..=max).contains(&weight) => ValidationOutcome::pass(),
        Some(_) => ValidationOutcome::fail(format!(
            "Your {which} weight must be between {min:.0} and {max:.0} {}.",
            unit.code()
        )),
    }
}

fn weight_bounds(unit: WeightUnit) -> (f64, f64) {
    match unit {
        WeightUnit::Kg => (MIN_WEIGHT_KG, MAX_WEIGHT_KG),
        WeightUnit::Lbs => (66.0, 660.0),
    }
}

fn check_body_fat(form: &FormData) -> ValidationOutcome {
    let in_range = |value: f64| (MIN_BODY_FAT..=MAX_BODY_FAT).contains(&value);
    match (form.current_body_fat, form.target_body_fat) {
        (Some(current), Some(target)) if in_range(current) && in_range(target) => {
            ValidationOutcome::pass()
        }
        (Some(_), Some(_)) => ValidationOutcome::fail(format!(
            "Body fat must be between {MIN_BODY_FAT:.0}% and {MAX_BODY_FAT:.0}%."
        )),
        _ => ValidationOutcome::fail("Please select your current and target body fat."),
    }
}
