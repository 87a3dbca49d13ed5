use crate::cli::interaction::{step_help, PromptResponse, StepContext, SurveyInteraction};
use crate::cli::output;
use crate::domain::FormData;
use crate::survey::{NavigationOutcome, Step, SurveyState};
use crate::validation::ValidationMode;

/// How a survey session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every step was accepted and the submission check passed.
    Completed(FormData),
    /// The respondent left before finishing.
    Abandoned {
        step: usize,
        message: Option<String>,
    },
}

/// Drives a [`SurveyState`] with answers coming from an interaction.
pub struct SurveyRunner {
    state: SurveyState,
    form: FormData,
}

impl SurveyRunner {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            state: SurveyState::new(mode),
            form: FormData::new(),
        }
    }

    /// Starts at `step` instead of the first screen.
    pub fn starting_at(mut self, step: usize) -> Self {
        self.state.resume_at(step);
        self
    }

    pub fn run<I: SurveyInteraction>(mut self, interaction: &mut I) -> RunOutcome {
        loop {
            let number = self.state.step();
            let Some(step) = Step::from_number(number) else {
                tracing::error!(step = number, "survey position out of range");
                return RunOutcome::Abandoned {
                    step: number,
                    message: None,
                };
            };

            let error = self.state.error_for(number).map(str::to_string);
            let context = StepContext {
                step,
                number,
                total: self.state.total_steps(),
                error: error.as_deref(),
            };

            match interaction.prompt_step(&context, &mut self.form) {
                PromptResponse::Answered { auto_advance } => {
                    self.form.normalize_selections();
                    match self.state.handle_next(&self.form, auto_advance) {
                        NavigationOutcome::Advanced { .. } => {}
                        NavigationOutcome::AdvancedWithError { from, message, .. } => {
                            if let Some(skipped) = Step::from_number(from) {
                                interaction.report_deferred(skipped, &message);
                            }
                        }
                        NavigationOutcome::Blocked { message } => {
                            interaction.report_blocked(step, &message);
                        }
                        NavigationOutcome::ReadyToSubmit => {
                            if let Some(outcome) = self.finish(interaction) {
                                return outcome;
                            }
                        }
                    }
                }
                PromptResponse::Back => {
                    self.state.handle_back();
                }
                PromptResponse::Help => output::info(step_help(step)),
                PromptResponse::Cancel => {
                    tracing::info!(step = number, "survey abandoned");
                    return RunOutcome::Abandoned {
                        step: number,
                        message: error,
                    };
                }
            }
        }
    }

    /// Runs the submission check. Returns `None` when the survey has to go
    /// back to a step that still fails.
    fn finish<I: SurveyInteraction>(&mut self, interaction: &mut I) -> Option<RunOutcome> {
        match self.state.check_submission(&self.form) {
            Ok(()) => Some(RunOutcome::Completed(self.form.clone())),
            Err(outstanding) => {
                self.state.resume_at(outstanding.step);
                if let Some(step) = Step::from_number(outstanding.step) {
                    interaction.report_blocked(step, &outstanding.message);
                }
                None
            }
        }
    }
}
