//! Local persistence: the form snapshot that survives the checkout round trip
//! and the ledger of already processed checkout returns.

pub mod json_backend;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::Plan;
use crate::domain::FormData;

pub use json_backend::{JsonStore, SubmissionLedger};

/// Answers saved before leaving for the hosted checkout page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAssessment {
    pub form: FormData,
    pub plan: Option<Plan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_reference_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PendingAssessment {
    pub fn new(form: FormData, plan: Option<Plan>) -> Self {
        Self {
            form,
            plan,
            client_reference_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.client_reference_id = Some(reference.into());
        self
    }
}
