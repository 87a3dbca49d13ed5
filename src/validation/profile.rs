use super::{require, ValidationOutcome};
use crate::domain::FormData;

/// Steps 1-5: gender, age, body type, goal, desired body.
pub(super) fn check(offset: usize, form: &FormData) -> Option<ValidationOutcome> {
    let outcome = match offset {
        0 => require(&form.gender, "Please select your gender."),
        1 => require(&form.age_range, "Please select your age range."),
        2 => require(&form.body_type, "Please select your body type."),
        3 => require(&form.fitness_goal, "Please select your main goal."),
        4 => require(&form.desired_body, "Please select the body you want."),
        _ => return None,
    };
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgeRange, Gender};

    #[test]
    fn gender_step_requires_a_choice() {
        let mut form = FormData::default();
        assert!(!check(0, &form).unwrap().valid);
        form.gender = Some(Gender::Female);
        assert!(check(0, &form).unwrap().valid);
    }

    #[test]
    fn age_message_is_user_facing() {
        let form = FormData::default();
        let outcome = check(1, &form).unwrap();
        assert_eq!(
            outcome.message.as_deref(),
            Some("Please select your age range.")
        );
        let form = FormData {
            age_range: Some(AgeRange::From30To39),
            ..FormData::default()
        };
        assert!(check(1, &form).unwrap().valid);
    }

    #[test]
    fn offsets_past_the_range_are_unregistered() {
        assert!(check(5, &FormData::default()).is_none());
    }
}
