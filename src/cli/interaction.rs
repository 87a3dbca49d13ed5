use crate::cli::output;
use crate::domain::FormData;
use crate::survey::Step;

/// Describes how a step prompt was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    /// The answer was written to the form. `auto_advance` is set when a
    /// single-choice selection should move on without an explicit continue.
    Answered { auto_advance: bool },
    /// Go back to the previous step.
    Back,
    /// Abandon the survey.
    Cancel,
    /// Request additional information for the current step.
    Help,
}

/// Data provided to render the current step.
pub struct StepContext<'a> {
    pub step: Step,
    pub number: usize,
    pub total: usize,
    /// Error recorded the last time this step was validated.
    pub error: Option<&'a str>,
}

/// Interaction surface used by the survey runner.
pub trait SurveyInteraction {
    fn prompt_step(&mut self, context: &StepContext<'_>, form: &mut FormData) -> PromptResponse;

    fn report_blocked(&mut self, _step: Step, message: &str) {
        output::error(message);
    }

    fn report_deferred(&mut self, _step: Step, message: &str) {
        output::warning(format!("{message} You can come back to it before submitting."));
    }
}

/// Extra guidance shown on `Help`.
pub fn step_help(step: Step) -> &'static str {
    if step.auto_advances() {
        "Pick one option; the survey moves on as soon as you choose. Press Esc to go back."
    } else {
        "Fill in your answer and confirm to continue. Press Esc on a list to go back."
    }
}
