//! What happens once the survey is finished: the optional checkout round
//! trip and the webhook submission.
//!
//! The respondent always reaches the thank-you screen. Delivery problems are
//! reported to the caller and logged; they never block completion.

use url::Url;

use crate::checkout::{CheckoutRequest, CheckoutReturn, CheckoutSettings, Plan, PlanSource};
use crate::domain::FormData;
use crate::errors::Result;
use crate::payload::{build_payload, AssessmentPayload, PayloadContext, DEFAULT_SOURCE};
use crate::storage::{JsonStore, PendingAssessment};
use crate::survey::Route;
use crate::webhook::{SubmissionReport, WebhookClient, WebhookTransport};

pub const THANK_YOU_MESSAGE: &str =
    "Thank you! Your personalised plan is being prepared and will arrive by email.";

/// Result of finishing the survey or processing a checkout return.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    Submitted {
        report: SubmissionReport,
        plan: Option<Plan>,
        plan_source: Option<PlanSource>,
    },
    /// Payload built but not sent.
    DryRun { payload: Box<AssessmentPayload> },
    /// This return was processed before; nothing was sent again.
    AlreadyProcessed,
    /// Payment returned but no saved answers were found.
    NoPendingAssessment,
    /// Checkout was abandoned; the saved answers stay for a retry.
    Canceled { snapshot_kept: bool },
    /// The URL was not a checkout return.
    NotACheckoutReturn(Route),
}

impl CompletionOutcome {
    pub fn shows_thank_you(&self) -> bool {
        matches!(
            self,
            CompletionOutcome::Submitted { .. }
                | CompletionOutcome::DryRun { .. }
                | CompletionOutcome::AlreadyProcessed
                | CompletionOutcome::NoPendingAssessment
        )
    }
}

pub struct CompletionFlow<'a, T: WebhookTransport> {
    store: &'a JsonStore,
    checkout: &'a CheckoutSettings,
    webhooks: &'a WebhookClient<T>,
    source: String,
    dry_run: bool,
}

impl<'a, T: WebhookTransport> CompletionFlow<'a, T> {
    pub fn new(
        store: &'a JsonStore,
        checkout: &'a CheckoutSettings,
        webhooks: &'a WebhookClient<T>,
    ) -> Self {
        Self {
            store,
            checkout,
            webhooks,
            source: DEFAULT_SOURCE.to_string(),
            dry_run: false,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Build payloads without sending them or touching the idempotency ledger.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Saves the answers and returns the hosted checkout URL to redirect to.
    pub fn begin_checkout(&self, form: &FormData, plan: Plan) -> Result<Url> {
        let request = CheckoutRequest::new(plan).with_email(form.email.as_deref());
        let url = request.redirect_url(self.checkout)?;
        let pending = PendingAssessment::new(form.clone(), Some(plan))
            .with_reference(request.client_reference_id.clone());
        self.store.save_pending(&pending)?;
        tracing::info!(%plan, reference = %request.client_reference_id, "redirecting to checkout");
        Ok(url)
    }

    /// Submits answers directly, without a purchase.
    pub fn submit_now(&self, form: &FormData, plan: Option<Plan>) -> CompletionOutcome {
        let context = PayloadContext::new(plan).with_source(self.source.clone());
        let payload = build_payload(form, &context);
        if self.dry_run {
            return CompletionOutcome::DryRun {
                payload: Box::new(payload),
            };
        }
        let report = self.webhooks.submit(&payload, plan);
        log_failures(&report);
        CompletionOutcome::Submitted {
            report,
            plan,
            plan_source: None,
        }
    }

    /// Handles a `/payment-success` or `/payment-canceled` return URL.
    pub fn handle_return(&self, return_url: &str) -> Result<CompletionOutcome> {
        let checkout_return = CheckoutReturn::parse(return_url)?;
        match checkout_return.route {
            Route::PaymentSuccess => self.complete_purchase(&checkout_return),
            Route::PaymentCanceled => {
                let snapshot_kept = self.store.load_pending()?.is_some();
                tracing::info!(snapshot_kept, "checkout canceled");
                Ok(CompletionOutcome::Canceled { snapshot_kept })
            }
            other => Ok(CompletionOutcome::NotACheckoutReturn(other)),
        }
    }

    fn complete_purchase(&self, checkout_return: &CheckoutReturn) -> Result<CompletionOutcome> {
        let pending = self.store.load_pending()?;
        let key = checkout_return
            .idempotency_key()
            .map(str::to_string)
            .or_else(|| {
                pending
                    .as_ref()
                    .and_then(|pending| pending.client_reference_id.clone())
            });

        if let Some(key) = &key {
            if self.store.submissions()?.contains(key) {
                tracing::info!(key = %key, "ignoring repeated checkout return");
                return Ok(CompletionOutcome::AlreadyProcessed);
            }
        }

        let Some(pending) = pending else {
            tracing::warn!("payment succeeded but no saved assessment was found");
            return Ok(CompletionOutcome::NoPendingAssessment);
        };

        let (plan, plan_source) = match pending.plan {
            Some(plan) => (Some(plan), Some(PlanSource::Snapshot)),
            None => match checkout_return.infer_plan() {
                Some(inferred) => (Some(inferred.plan), Some(inferred.source)),
                None => (None, None),
            },
        };

        let mut context = PayloadContext::new(plan).with_source(self.source.clone());
        if let Some(source) = plan_source {
            context = context.with_plan_source(source);
        }
        let payload = build_payload(&pending.form, &context);
        if self.dry_run {
            return Ok(CompletionOutcome::DryRun {
                payload: Box::new(payload),
            });
        }

        match &key {
            Some(key) => {
                if !self.store.claim_submission(key)? {
                    return Ok(CompletionOutcome::AlreadyProcessed);
                }
            }
            None => tracing::warn!("checkout return has no idempotency key"),
        }

        let report = self.webhooks.submit(&payload, plan);
        log_failures(&report);
        if report.submitted() {
            self.store.clear_pending()?;
        } else {
            tracing::warn!(
                path = %self.store.pending_path().display(),
                "keeping saved assessment for manual follow-up"
            );
        }

        Ok(CompletionOutcome::Submitted {
            report,
            plan,
            plan_source,
        })
    }
}

fn log_failures(report: &SubmissionReport) {
    for failure in report.failures() {
        tracing::warn!(error = %failure, "webhook delivery failed");
    }
}
