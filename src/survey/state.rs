use std::collections::BTreeMap;

use crate::domain::FormData;
use crate::survey::steps::{Step, TOTAL_STEPS};
use crate::validation::{self, ValidationMode, ValidationOutcome, GENERIC_FAILURE_MESSAGE};

/// Direction of the most recent move. Front ends use it for transitions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Next,
    Back,
}

/// What happened when the respondent asked to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The step passed validation and the survey moved on.
    Advanced { step: usize },
    /// The step failed validation but the survey moved on anyway, either
    /// because the step defers validation on auto-advance or because the
    /// session is lenient. The error stays recorded against `from`.
    AdvancedWithError {
        from: usize,
        step: usize,
        message: String,
    },
    /// Strict mode refused to move; the step is unchanged.
    Blocked { message: String },
    /// The last step was accepted; the caller should submit.
    ReadyToSubmit,
}

/// A recorded error that still fails when submission is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutstandingError {
    pub step: usize,
    pub message: String,
}

/// Position and validation bookkeeping for one survey session.
#[derive(Debug, Clone)]
pub struct SurveyState {
    step: usize,
    total_steps: usize,
    direction: Direction,
    mode: ValidationMode,
    step_errors: BTreeMap<usize, String>,
}

impl Default for SurveyState {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}

impl SurveyState {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            step: 1,
            total_steps: TOTAL_STEPS,
            direction: Direction::Next,
            mode,
            step_errors: BTreeMap::new(),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> Option<Step> {
        Step::from_number(self.step)
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.total_steps
    }

    /// Errors recorded during this session, keyed by step number.
    pub fn step_errors(&self) -> &BTreeMap<usize, String> {
        &self.step_errors
    }

    pub fn error_for(&self, step: usize) -> Option<&str> {
        self.step_errors.get(&step).map(String::as_str)
    }

    /// Validates the current step and moves forward when allowed.
    pub fn handle_next(&mut self, form: &FormData, is_auto_next: bool) -> NavigationOutcome {
        let step = self.step;
        let (outcome, deferrable) = match validation::dispatch(step, form) {
            Ok(outcome) => {
                let deferrable = is_auto_next
                    && Step::from_number(step)
                        .map(Step::auto_advances)
                        .unwrap_or(false);
                (outcome, deferrable)
            }
            Err(fault) => {
                tracing::error!(step, %fault, "validator dispatch failed");
                (ValidationOutcome::fail(GENERIC_FAILURE_MESSAGE), false)
            }
        };

        if outcome.valid {
            self.step_errors.remove(&step);
            return self.advance();
        }

        let message = outcome
            .message
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        self.step_errors.insert(step, message.clone());

        if deferrable {
            tracing::debug!(step, %message, "deferring validation on auto-advance");
        } else if self.mode == ValidationMode::Strict {
            tracing::debug!(step, %message, "step blocked");
            return NavigationOutcome::Blocked { message };
        } else {
            tracing::warn!(step, %message, "advancing past invalid step in lenient mode");
        }

        match self.advance() {
            NavigationOutcome::Advanced { step: next } => NavigationOutcome::AdvancedWithError {
                from: step,
                step: next,
                message,
            },
            other => other,
        }
    }

    /// Moves back one step without validating. Returns the new step.
    pub fn handle_back(&mut self) -> usize {
        self.direction = Direction::Back;
        self.step = self.step.saturating_sub(1).max(1);
        self.step
    }

    /// Restores the position after a reload of `/form/:step`.
    pub fn resume_at(&mut self, step: usize) -> usize {
        self.step = step.clamp(1, self.total_steps);
        self.direction = Direction::Next;
        self.step
    }

    /// Validates every step again before submission.
    ///
    /// Steps that were never visited (a session resumed mid-survey) are
    /// checked too. Strict sessions refuse to submit while any step fails and
    /// report the first one; lenient sessions always pass.
    pub fn check_submission(&mut self, form: &FormData) -> Result<(), OutstandingError> {
        for step in 1..=self.total_steps {
            let outcome = validation::validate(step, form);
            if outcome.valid {
                self.step_errors.remove(&step);
            } else {
                let message = outcome
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                self.step_errors.insert(step, message);
            }
        }

        if self.mode == ValidationMode::Lenient {
            if !self.step_errors.is_empty() {
                tracing::warn!(
                    count = self.step_errors.len(),
                    "submitting with unresolved step errors"
                );
            }
            return Ok(());
        }

        match self.step_errors.iter().next() {
            Some((step, message)) => Err(OutstandingError {
                step: *step,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn advance(&mut self) -> NavigationOutcome {
        self.direction = Direction::Next;
        if self.step >= self.total_steps {
            self.step = self.total_steps;
            return NavigationOutcome::ReadyToSubmit;
        }
        self.step += 1;
        NavigationOutcome::Advanced { step: self.step }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::complete_form;

    #[test]
    fn back_then_next_returns_to_the_same_step() {
        let form = complete_form();
        for start in 2..=TOTAL_STEPS {
            let mut state = SurveyState::default();
            state.resume_at(start);
            state.handle_back();
            assert_eq!(state.step(), start - 1);
            assert_eq!(state.direction(), Direction::Back);
            let outcome = state.handle_next(&form, false);
            assert_eq!(outcome, NavigationOutcome::Advanced { step: start });
        }
    }

    #[test]
    fn back_floors_at_the_first_step() {
        let mut state = SurveyState::default();
        assert_eq!(state.handle_back(), 1);
        assert_eq!(state.handle_back(), 1);
    }

    #[test]
    fn strict_mode_blocks_every_step_on_an_empty_form() {
        let form = FormData::default();
        for step in 1..=TOTAL_STEPS {
            let mut state = SurveyState::new(ValidationMode::Strict);
            state.resume_at(step);
            let outcome = state.handle_next(&form, false);
            assert!(
                matches!(outcome, NavigationOutcome::Blocked { .. }),
                "step {step} should block"
            );
            assert_eq!(state.step(), step);
            assert!(state.error_for(step).is_some());
        }
    }

    #[test]
    fn lenient_mode_advances_and_records_the_error() {
        let form = FormData::default();
        let mut state = SurveyState::new(ValidationMode::Lenient);
        let outcome = state.handle_next(&form, false);
        assert_eq!(
            outcome,
            NavigationOutcome::AdvancedWithError {
                from: 1,
                step: 2,
                message: "Please select your gender.".into(),
            }
        );
        assert_eq!(state.error_for(1), Some("Please select your gender."));
    }

    #[test]
    fn auto_advance_defers_validation_on_single_choice_steps() {
        let form = FormData::default();
        let mut state = SurveyState::new(ValidationMode::Strict);
        state.resume_at(2);
        let outcome = state.handle_next(&form, true);
        assert!(matches!(
            outcome,
            NavigationOutcome::AdvancedWithError { from: 2, step: 3, .. }
        ));
    }

    #[test]
    fn auto_advance_does_not_bypass_multi_input_steps() {
        let form = FormData::default();
        let mut state = SurveyState::new(ValidationMode::Strict);
        state.resume_at(10);
        let outcome = state.handle_next(&form, true);
        assert!(matches!(outcome, NavigationOutcome::Blocked { .. }));
        assert_eq!(state.step(), 10);
    }

    #[test]
    fn passing_a_step_clears_its_recorded_error() {
        let mut form = FormData::default();
        let mut state = SurveyState::new(ValidationMode::Strict);
        state.handle_next(&form, false);
        assert!(state.error_for(1).is_some());
        form.gender = Some(crate::domain::Gender::Male);
        assert_eq!(
            state.handle_next(&form, false),
            NavigationOutcome::Advanced { step: 2 }
        );
        assert!(state.step_errors().is_empty());
    }

    #[test]
    fn last_step_requests_submission_instead_of_incrementing() {
        let form = complete_form();
        let mut state = SurveyState::default();
        state.resume_at(TOTAL_STEPS);
        assert!(state.is_last_step());
        assert_eq!(state.handle_next(&form, false), NavigationOutcome::ReadyToSubmit);
        assert_eq!(state.step(), TOTAL_STEPS);
    }

    #[test]
    fn full_walk_reaches_submission() {
        let form = complete_form();
        let mut state = SurveyState::default();
        let mut moves = 0;
        loop {
            match state.handle_next(&form, false) {
                NavigationOutcome::Advanced { .. } => moves += 1,
                NavigationOutcome::ReadyToSubmit => break,
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(moves, TOTAL_STEPS - 1);
        assert!(state.check_submission(&form).is_ok());
    }

    #[test]
    fn strict_submission_reports_first_outstanding_step() {
        let mut form = complete_form();
        form.age_range = None;
        form.body_type = None;
        let mut state = SurveyState::new(ValidationMode::Strict);
        state.resume_at(2);
        state.handle_next(&form, true);
        state.handle_next(&form, true);
        let err = state.check_submission(&form).unwrap_err();
        assert_eq!(err.step, 2);

        form.age_range = Some(crate::domain::AgeRange::From40To49);
        let err = state.check_submission(&form).unwrap_err();
        assert_eq!(err.step, 3);
    }

    #[test]
    fn lenient_submission_ignores_outstanding_errors() {
        let form = FormData::default();
        let mut state = SurveyState::new(ValidationMode::Lenient);
        state.handle_next(&form, false);
        assert!(state.check_submission(&form).is_ok());
        assert_eq!(state.step_errors().len(), TOTAL_STEPS);
    }

    #[test]
    fn strict_submission_checks_steps_that_were_never_visited() {
        let mut form = complete_form();
        form.gender = None;
        form.height_cm = None;
        let mut state = SurveyState::new(ValidationMode::Strict);
        state.resume_at(12);
        assert!(state.step_errors().is_empty());

        let err = state.check_submission(&form).unwrap_err();
        assert_eq!(err.step, 1);
        assert!(state.error_for(9).is_some());
    }

    #[test]
    fn resume_clamps_to_the_survey_bounds() {
        let mut state = SurveyState::default();
        assert_eq!(state.resume_at(0), 1);
        assert_eq!(state.resume_at(99), TOTAL_STEPS);
        assert_eq!(state.resume_at(12), 12);
    }
}
