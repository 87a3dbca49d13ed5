//! Delivery of the assessment payload to the plan-generation webhooks.
//!
//! Each target gets exactly one POST. Failures are reported back to the caller
//! and logged, never retried.

mod transport;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::Plan;
use crate::errors::Result;
use crate::payload::AssessmentPayload;

pub use transport::{ReqwestTransport, TransportError, WebhookTransport};

/// The downstream consumers of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    MealPlan,
    WorkoutPlan,
}

impl Endpoint {
    /// Targets for a purchase. Without a known plan both consumers get the
    /// payload.
    pub fn targets(plan: Option<Plan>) -> Vec<Endpoint> {
        let Some(plan) = plan else {
            return vec![Endpoint::MealPlan, Endpoint::WorkoutPlan];
        };
        let mut targets = Vec::with_capacity(2);
        if plan.includes_meal() {
            targets.push(Endpoint::MealPlan);
        }
        if plan.includes_workout() {
            targets.push(Endpoint::WorkoutPlan);
        }
        targets
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::MealPlan => f.write_str("meal-plan"),
            Endpoint::WorkoutPlan => f.write_str("workout-plan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("{0} webhook URL is not configured")]
    NotConfigured(Endpoint),
    #[error("{endpoint} webhook answered HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },
    #[error("{endpoint} webhook request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        source: TransportError,
    },
    #[error("payload could not be encoded: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookSettings {
    pub meal_plan_url: Option<String>,
    pub workout_plan_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            meal_plan_url: Some("https://hooks.example.com/assessment/meal-plan".into()),
            workout_plan_url: Some("https://hooks.example.com/assessment/workout-plan".into()),
            timeout_secs: 10,
        }
    }
}

impl WebhookSettings {
    pub fn url_for(&self, endpoint: Endpoint) -> Option<&str> {
        let url = match endpoint {
            Endpoint::MealPlan => self.meal_plan_url.as_deref(),
            Endpoint::WorkoutPlan => self.workout_plan_url.as_deref(),
        };
        url.map(str::trim).filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Outcome of one POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub endpoint: Endpoint,
    pub result: std::result::Result<u16, WebhookError>,
}

/// Per-endpoint outcomes of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub deliveries: Vec<Delivery>,
    pub encode_error: Option<WebhookError>,
}

impl SubmissionReport {
    /// True only when every targeted endpoint accepted the payload.
    pub fn submitted(&self) -> bool {
        self.encode_error.is_none()
            && !self.deliveries.is_empty()
            && self.deliveries.iter().all(|delivery| delivery.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &WebhookError> {
        self.encode_error.iter().chain(
            self.deliveries
                .iter()
                .filter_map(|delivery| delivery.result.as_ref().err()),
        )
    }
}

pub struct WebhookClient<T: WebhookTransport = ReqwestTransport> {
    settings: WebhookSettings,
    transport: T,
}

impl WebhookClient<ReqwestTransport> {
    /// Client backed by a blocking HTTP transport using the configured timeout.
    pub fn from_settings(settings: WebhookSettings) -> Result<Self> {
        let transport = ReqwestTransport::new(settings.timeout())?;
        Ok(Self::with_transport(settings, transport))
    }
}

impl<T: WebhookTransport> WebhookClient<T> {
    pub fn with_transport(settings: WebhookSettings, transport: T) -> Self {
        Self {
            settings,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POSTs the payload once to every endpoint the plan targets.
    pub fn submit(&self, payload: &AssessmentPayload, plan: Option<Plan>) -> SubmissionReport {
        let body = match serde_json::to_vec(payload) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = %err, "failed to encode webhook payload");
                return SubmissionReport {
                    deliveries: Vec::new(),
                    encode_error: Some(WebhookError::Encode(err.to_string())),
                };
            }
        };

        let deliveries = Endpoint::targets(plan)
            .into_iter()
            .map(|endpoint| Delivery {
                endpoint,
                result: self.deliver(endpoint, &body),
            })
            .collect();

        let report = SubmissionReport {
            deliveries,
            encode_error: None,
        };
        if report.submitted() {
            tracing::info!(
                submission = %payload.metadata.submission_id,
                endpoints = report.deliveries.len(),
                "assessment submitted"
            );
        }
        report
    }

    fn deliver(&self, endpoint: Endpoint, body: &[u8]) -> std::result::Result<u16, WebhookError> {
        let Some(url) = self.settings.url_for(endpoint) else {
            tracing::warn!(%endpoint, "skipping webhook with no URL");
            return Err(WebhookError::NotConfigured(endpoint));
        };

        match self.transport.post_json(url, body) {
            Ok(status) if (200..300).contains(&status) => {
                tracing::debug!(%endpoint, status, "webhook accepted payload");
                Ok(status)
            }
            Ok(status) => {
                tracing::warn!(%endpoint, status, "webhook rejected payload");
                Err(WebhookError::Status { endpoint, status })
            }
            Err(source) => {
                tracing::warn!(%endpoint, error = %source, "webhook request failed");
                Err(WebhookError::Transport { endpoint, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::payload::{build_payload, PayloadContext};
    use crate::test_support::complete_form;

    struct MockTransport {
        responses: RefCell<VecDeque<std::result::Result<u16, TransportError>>>,
        calls: RefCell<Vec<String>>,
    }

    impl MockTransport {
        fn new(responses: Vec<std::result::Result<u16, TransportError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl WebhookTransport for MockTransport {
        fn post_json(&self, url: &str, body: &[u8]) -> std::result::Result<u16, TransportError> {
            assert!(serde_json::from_slice::<serde_json::Value>(body).is_ok());
            self.calls.borrow_mut().push(url.to_string());
            self.responses.borrow_mut().pop_front().unwrap_or(Ok(200))
        }
    }

    fn payload() -> AssessmentPayload {
        build_payload(&complete_form(), &PayloadContext::new(None))
    }

    #[test]
    fn plan_selects_targets() {
        assert_eq!(Endpoint::targets(Some(Plan::Meal)), vec![Endpoint::MealPlan]);
        assert_eq!(
            Endpoint::targets(Some(Plan::Workout)),
            vec![Endpoint::WorkoutPlan]
        );
        assert_eq!(Endpoint::targets(None).len(), 2);
        assert_eq!(Endpoint::targets(Some(Plan::Combined)).len(), 2);
    }

    #[test]
    fn all_accepted_means_submitted() {
        let client =
            WebhookClient::with_transport(WebhookSettings::default(), MockTransport::new(vec![]));
        let report = client.submit(&payload(), Some(Plan::Combined));
        assert!(report.submitted());
        assert_eq!(client.transport.calls.borrow().len(), 2);
    }

    #[test]
    fn one_failed_endpoint_fails_the_submission_without_retry() {
        let transport = MockTransport::new(vec![
            Ok(500),
            Err(TransportError("connection refused".into())),
        ]);
        let client = WebhookClient::with_transport(WebhookSettings::default(), transport);
        let report = client.submit(&payload(), None);
        assert!(!report.submitted());
        assert_eq!(report.failures().count(), 2);
        assert_eq!(client.transport.calls.borrow().len(), 2);
        assert!(matches!(
            report.deliveries[0].result,
            Err(WebhookError::Status { status: 500, .. })
        ));
    }

    #[test]
    fn missing_url_is_reported_not_sent() {
        let settings = WebhookSettings {
            meal_plan_url: Some("  ".into()),
            ..WebhookSettings::default()
        };
        let client = WebhookClient::with_transport(settings, MockTransport::new(vec![]));
        let report = client.submit(&payload(), Some(Plan::Meal));
        assert!(!report.submitted());
        assert_eq!(
            report.deliveries[0].result,
            Err(WebhookError::NotConfigured(Endpoint::MealPlan))
        );
        assert!(client.transport.calls.borrow().is_empty());
    }
}
