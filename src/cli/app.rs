use std::{
    env, fs,
    io::{self, Read},
    path::PathBuf,
};

use getopts::{Matches, Options};

use crate::checkout::Plan;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::prompts::TerminalInteraction;
use crate::cli::runner::{RunOutcome, SurveyRunner};
use crate::cli::scripted::ScriptedInteraction;
use crate::completion::{CompletionFlow, CompletionOutcome, THANK_YOU_MESSAGE};
use crate::config::ConfigManager;
use crate::domain::FormData;
use crate::errors::CliError;
use crate::storage::JsonStore;
use crate::survey::{Route, TOTAL_STEPS};
use crate::utils::build_info;
use crate::validation::ValidationMode;
use crate::webhook::WebhookClient;

/// When set, answers are read from stdin and output is left unstyled.
pub const SCRIPT_ENV: &str = "ASSESSMENT_CLI_SCRIPT";

const USAGE_BRIEF: &str = "Usage: assessment_cli [options]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliMode {
    Interactive,
    Script,
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt("a", "answers", "answer every step from a JSON file", "FILE");
    opts.optopt(
        "p",
        "plan",
        "start checkout for a plan (workout, meal, combined)",
        "PLAN",
    );
    opts.optopt(
        "r",
        "return-url",
        "process a /payment-success or /payment-canceled return",
        "URL",
    );
    opts.optopt(
        "",
        "route",
        "open the app at a path such as /form/12",
        "PATH",
    );
    opts.optflag("n", "dry-run", "print the payload instead of sending it");
    opts.optflag("l", "lenient", "let the survey advance past invalid answers");
    opts.optopt("c", "config", "read settings from FILE", "FILE");
    opts.optflag("V", "version", "print build information");
    opts.optflag("h", "help", "print this help");
    opts
}

/// Parses `args` (without the program name) and runs the assessment.
pub fn run_cli<I>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let opts = options();
    let matches = opts
        .parse(args)
        .map_err(|err| CliError::Input(err.to_string()))?;

    if matches.opt_present("help") {
        print!("{}", opts.usage(USAGE_BRIEF));
        return Ok(());
    }
    if matches.opt_present("version") {
        println!("{}", build_info::current().describe());
        return Ok(());
    }
    if let Some(extra) = matches.free.first() {
        return Err(CliError::Input(format!("unexpected argument `{extra}`")));
    }

    let mode = if env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    if mode == CliMode::Script {
        output::set_preferences(OutputPreferences {
            plain_mode: true,
            quiet_mode: false,
        });
    }

    let manager = matches
        .opt_str("config")
        .map(|path| ConfigManager::from_path(PathBuf::from(path)))
        .unwrap_or_default();
    let mut config = manager.load_effective()?;
    if matches.opt_present("lenient") {
        config.survey.validation_mode = ValidationMode::Lenient;
    }

    let store = JsonStore::new_default()?;
    let client = WebhookClient::from_settings(config.webhooks.clone())?;
    let flow = CompletionFlow::new(&store, &config.checkout, &client)
        .with_source(config.survey.source.clone())
        .dry_run(matches.opt_present("dry-run"));

    if let Some(return_url) = matches.opt_str("return-url") {
        let outcome = flow.handle_return(&return_url)?;
        return report_outcome(&outcome);
    }

    let start_step = match matches.opt_str("route") {
        None => 1,
        Some(path) => match Route::parse(&path) {
            Route::Landing => 1,
            Route::Form { step } => step.unwrap_or(1).min(TOTAL_STEPS),
            Route::PaymentSuccess | Route::PaymentCanceled => {
                let outcome = flow.handle_return(&path)?;
                return report_outcome(&outcome);
            }
            Route::NotFound => {
                return Err(CliError::Input(format!("page not found: {path}")));
            }
        },
    };

    let plan = matches
        .opt_str("plan")
        .map(|sku| sku.parse::<Plan>())
        .transpose()?;

    let runner = SurveyRunner::new(config.survey.validation_mode).starting_at(start_step);
    let form = match load_answers(&matches, mode)? {
        Some(answers) => run_scripted(runner, answers)?,
        None => match run_interactive(runner, start_step) {
            Some(form) => form,
            None => return Ok(()),
        },
    };

    match plan {
        Some(plan) => {
            let url = flow.begin_checkout(&form, plan)?;
            output::info(format!("Continue to checkout ({}):", plan.label()));
            println!("{url}");
            output::info("Your answers are saved until you return from checkout.");
            Ok(())
        }
        None => report_outcome(&flow.submit_now(&form, None)),
    }
}

fn load_answers(matches: &Matches, mode: CliMode) -> Result<Option<FormData>, CliError> {
    let raw = if let Some(path) = matches.opt_str("answers") {
        fs::read_to_string(&path)
            .map_err(|err| CliError::Input(format!("cannot read answers from {path}: {err}")))?
    } else if mode == CliMode::Script {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        return Ok(None);
    };

    let form = serde_json::from_str(&raw)
        .map_err(|err| CliError::Input(format!("answers are not valid JSON: {err}")))?;
    Ok(Some(form))
}

fn run_scripted(runner: SurveyRunner, answers: FormData) -> Result<FormData, CliError> {
    let mut scripted = ScriptedInteraction::new(answers);
    match runner.run(&mut scripted) {
        RunOutcome::Completed(form) => Ok(form),
        RunOutcome::Abandoned { step, message } => {
            let message = scripted
                .failure()
                .map(|(_, message)| message.to_string())
                .or(message)
                .unwrap_or_else(|| "survey was not completed".to_string());
            Err(CliError::Input(format!("step {step}: {message}")))
        }
    }
}

fn run_interactive(runner: SurveyRunner, start_step: usize) -> Option<FormData> {
    if start_step == 1 {
        output::section("Fitness assessment");
        output::info(format!(
            "Answer {TOTAL_STEPS} quick questions and get a plan built around you."
        ));
    }
    let mut terminal = TerminalInteraction::new();
    match runner.run(&mut terminal) {
        RunOutcome::Completed(form) => Some(form),
        RunOutcome::Abandoned { step, .. } => {
            output::warning(format!("Survey closed at step {step}. Nothing was sent."));
            None
        }
    }
}

fn report_outcome(outcome: &CompletionOutcome) -> Result<(), CliError> {
    match outcome {
        CompletionOutcome::DryRun { payload } => {
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
        CompletionOutcome::Submitted {
            report,
            plan,
            plan_source,
        } => {
            tracing::info!(
                submitted = report.submitted(),
                plan = ?plan,
                plan_source = ?plan_source,
                "submission finished"
            );
        }
        CompletionOutcome::AlreadyProcessed | CompletionOutcome::NoPendingAssessment => {}
        CompletionOutcome::Canceled { snapshot_kept } => {
            output::warning("Checkout was canceled.");
            if *snapshot_kept {
                output::info("Your answers are saved. Run again with --plan to retry checkout.");
            }
        }
        CompletionOutcome::NotACheckoutReturn(route) => {
            return Err(CliError::Input(format!(
                "`{route}` is not a checkout return"
            )));
        }
    }

    if outcome.shows_thank_you() {
        output::success(THANK_YOU_MESSAGE);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Matches {
        options()
            .parse(args.iter().map(|arg| arg.to_string()))
            .unwrap()
    }

    #[test]
    fn options_accept_long_and_short_forms() {
        let matches = parse(&["-p", "meal", "--dry-run", "--route", "/form/4"]);
        assert_eq!(matches.opt_str("plan").as_deref(), Some("meal"));
        assert!(matches.opt_present("n"));
        assert_eq!(matches.opt_str("route").as_deref(), Some("/form/4"));
    }

    #[test]
    fn unknown_flags_are_input_errors() {
        let result = run_cli(vec!["--bogus".to_string()]);
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn help_and_version_return_early() {
        assert!(run_cli(vec!["--help".to_string()]).is_ok());
        assert!(run_cli(vec!["-V".to_string()]).is_ok());
    }
}
