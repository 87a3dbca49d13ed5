//! Hosted checkout: plan SKUs, redirect construction, and return parsing.
//!
//! Payment itself happens on the processor's hosted page. This module only
//! builds the outbound redirect and reads what comes back on the return URL.
//! Nothing here confirms a payment actually succeeded.

mod plan;
mod redirect;

pub use plan::{Plan, PriceTable};
pub use redirect::{
    CheckoutRequest, CheckoutReturn, CheckoutSettings, InferredPlan, PlanSource,
    SESSION_ID_PLACEHOLDER,
};
