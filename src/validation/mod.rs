//! Per-step validation of the survey record.
//!
//! Validators are pure predicates over [`FormData`]. Steps are grouped into
//! five contiguous ranges; each range has its own sub-validator keyed by the
//! step's offset within the range.

mod assessment;
mod body;
mod lifestyle;
mod profile;
mod training;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FormData;
use crate::survey::steps::StepRange;

/// Message shown when a validator cannot run for a step.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong checking this answer.";

/// Result of validating one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Raised when no validator is registered for a step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFault {
    #[error("no validator registered for step {0}")]
    UnknownStep(usize),
}

/// Whether a failed validation blocks forward navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Strict,
    Lenient,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Strict => f.write_str("strict"),
            ValidationMode::Lenient => f.write_str("lenient"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "lenient" => Ok(ValidationMode::Lenient),
            other => Err(format!("unknown validation mode `{other}`")),
        }
    }
}

/// Runs the validator registered for `step`.
pub fn dispatch(step: usize, form: &FormData) -> Result<ValidationOutcome, ValidationFault> {
    let (range, offset) = StepRange::locate(step).ok_or(ValidationFault::UnknownStep(step))?;
    let outcome = match range {
        StepRange::Profile => profile::check(offset, form),
        StepRange::Body => body::check(offset, form),
        StepRange::Training => training::check(offset, form),
        StepRange::Lifestyle => lifestyle::check(offset, form),
        StepRange::Assessment => assessment::check(offset, form),
    };
    outcome.ok_or(ValidationFault::UnknownStep(step))
}

/// Validates `step`, folding faults into a generic failed outcome.
pub fn validate(step: usize, form: &FormData) -> ValidationOutcome {
    dispatch(step, form).unwrap_or_else(|fault| {
        tracing::error!(%fault, "validator dispatch failed");
        ValidationOutcome::fail(GENERIC_FAILURE_MESSAGE)
    })
}

pub(crate) fn require<T>(value: &Option<T>, message: &str) -> ValidationOutcome {
    if value.is_some() {
        ValidationOutcome::pass()
    } else {
        ValidationOutcome::fail(message)
    }
}

pub(crate) fn require_rating(value: Option<u8>, message: &str) -> ValidationOutcome {
    match value {
        Some(rating) if (1..=5).contains(&rating) => ValidationOutcome::pass(),
        _ => ValidationOutcome::fail(message),
    }
}

/// Multi-select answers pass when any item (including the "none" sentinel)
/// is chosen or a custom entry was typed.
pub(crate) fn require_selection<T>(
    items: &[T],
    custom: Option<&String>,
    message: &str,
) -> ValidationOutcome {
    let has_custom = custom.map(|value| !value.trim().is_empty()).unwrap_or(false);
    if !items.is_empty() || has_custom {
        ValidationOutcome::pass()
    } else {
        ValidationOutcome::fail(message)
    }
}

pub(crate) fn first_failure(outcomes: impl IntoIterator<Item = ValidationOutcome>) -> ValidationOutcome {
    outcomes
        .into_iter()
        .find(|outcome| !outcome.valid)
        .unwrap_or_else(ValidationOutcome::pass)
}
