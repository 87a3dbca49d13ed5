use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::plan::{Plan, PriceTable};
use crate::domain::clean_text;
use crate::errors::Result;
use crate::survey::Route;

/// Token the processor substitutes with the real session id on return.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

const LOCAL_BASE: &str = "http://localhost/";

/// Where the hosted checkout lives and how to come back from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutSettings {
    pub publishable_key: String,
    pub checkout_url: String,
    pub success_url: String,
    pub cancel_url: String,
    pub prices: PriceTable,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            publishable_key: "pk_test_assessment_default".into(),
            checkout_url: "https://checkout.example.com/pay".into(),
            success_url: "http://localhost:3000/payment-success".into(),
            cancel_url: "http://localhost:3000/payment-canceled".into(),
            prices: PriceTable::default(),
        }
    }
}

/// One outbound checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub plan: Plan,
    pub client_reference_id: String,
    pub customer_email: Option<String>,
}

impl CheckoutRequest {
    /// New request whose client reference starts with the plan SKU so the
    /// return page can tell which plan was chosen.
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            client_reference_id: format!("{}_{}", plan.sku(), Uuid::new_v4().simple()),
            customer_email: None,
        }
    }

    pub fn with_email(mut self, email: Option<&str>) -> Self {
        self.customer_email = email.and_then(clean_text);
        self
    }

    /// Hosted checkout URL carrying the key, price and return URLs.
    pub fn redirect_url(&self, settings: &CheckoutSettings) -> Result<Url> {
        let mut url = Url::parse(&settings.checkout_url)?;
        let success_url = success_return_url(&settings.success_url)?;
        let cancel_url = Url::parse(&settings.cancel_url)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("key", &settings.publishable_key)
                .append_pair("price", settings.prices.price_for(self.plan))
                .append_pair("quantity", "1")
                .append_pair("mode", "payment")
                .append_pair("client_reference_id", &self.client_reference_id)
                .append_pair("success_url", &success_url)
                .append_pair("cancel_url", cancel_url.as_str());
            if let Some(email) = &self.customer_email {
                query.append_pair("prefilled_email", email);
            }
        }
        tracing::debug!(plan = %self.plan, url = %url, "built checkout redirect");
        Ok(url)
    }
}

fn success_return_url(raw: &str) -> Result<String> {
    let base = Url::parse(raw)?;
    let separator = if base.query().is_some() { '&' } else { '?' };
    Ok(format!(
        "{}{}session_id={}",
        base.as_str(),
        separator,
        SESSION_ID_PLACEHOLDER
    ))
}

/// How a purchased plan was worked out on return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanSource {
    /// Saved with the form before leaving for checkout.
    Snapshot,
    /// Prefix of the client reference echoed back by the processor.
    ClientReference,
    /// Substring match on the session id. Unverified.
    SessionIdHeuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredPlan {
    pub plan: Plan,
    pub source: PlanSource,
}

/// Parameters read from a checkout return URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReturn {
    pub route: Route,
    pub session_id: Option<String>,
    pub client_reference_id: Option<String>,
}

impl CheckoutReturn {
    /// Parses an absolute return URL or a bare path such as
    /// `/payment-success?session_id=...`.
    pub fn parse(input: &str) -> Result<Self> {
        let url = match Url::parse(input.trim()) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(LOCAL_BASE)?.join(input.trim())?
            }
            Err(err) => return Err(err.into()),
        };

        let mut session_id = None;
        let mut client_reference_id = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "session_id" => session_id = clean_text(&value),
                "client_reference_id" => client_reference_id = clean_text(&value),
                _ => {}
            }
        }

        if session_id.as_deref() == Some(SESSION_ID_PLACEHOLDER) {
            tracing::warn!("checkout returned without substituting the session id");
            session_id = None;
        }

        Ok(Self {
            route: Route::parse(url.as_str()),
            session_id,
            client_reference_id,
        })
    }

    /// Key used to make sure a return is only processed once.
    pub fn idempotency_key(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .or(self.client_reference_id.as_deref())
    }

    /// Best-effort guess at the purchased plan. This is not a payment
    /// confirmation; a processor-side session lookup would be needed for that.
    pub fn infer_plan(&self) -> Option<InferredPlan> {
        if let Some(plan) = self
            .client_reference_id
            .as_deref()
            .and_then(plan_from_reference)
        {
            return Some(InferredPlan {
                plan,
                source: PlanSource::ClientReference,
            });
        }

        let session = self.session_id.as_deref()?.to_ascii_lowercase();
        let plan = [Plan::Combined, Plan::Meal, Plan::Workout]
            .into_iter()
            .find(|plan| session.contains(plan.sku()))?;
        tracing::warn!(%plan, "plan inferred from session id substring; unverified");
        Some(InferredPlan {
            plan,
            source: PlanSource::SessionIdHeuristic,
        })
    }
}

fn plan_from_reference(reference: &str) -> Option<Plan> {
    reference.split('_').next().and_then(Plan::from_sku)
}
