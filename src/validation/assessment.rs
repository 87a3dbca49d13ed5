use super::{first_failure, require, require_rating, ValidationOutcome};
use crate::domain::FormData;

const RATING_MESSAGE: &str = "Please choose how much you agree, from 1 to 5.";

/// Steps 24-30: the five agreement ratings, start timing, contact details.
pub(super) fn check(offset: usize, form: &FormData) -> Option<ValidationOutcome> {
    let outcome = match offset {
        0 => require_rating(form.breathlessness_rating, RATING_MESSAGE),
        1 => require_rating(form.habit_relapse_rating, RATING_MESSAGE),
        2 => require_rating(form.workout_suitability_rating, RATING_MESSAGE),
        3 => require_rating(form.motivation_rating, RATING_MESSAGE),
        4 => require_rating(form.diet_consistency_rating, RATING_MESSAGE),
        5 => require(&form.start_commitment, "Please choose when you want to start."),
        6 => check_contact(form),
        _ => return None,
    };
    Some(outcome)
}

fn check_contact(form: &FormData) -> ValidationOutcome {
    let name = match form.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => ValidationOutcome::pass(),
        _ => ValidationOutcome::fail("Please enter your name."),
    };
    let email = match form.email.as_deref() {
        Some(email) if looks_like_email(email) => ValidationOutcome::pass(),
        Some(_) => ValidationOutcome::fail("Please enter a valid email address."),
        None => ValidationOutcome::fail("Please enter your email address."),
    };
    first_failure([name, email])
}

/// Shape check only; the address is never verified against a mail server.
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
            .unwrap_or(false)
}
