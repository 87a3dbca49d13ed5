#![doc(test(attr(deny(warnings))))]

//! Assessment Core runs the fitness assessment survey: step sequencing and
//! validation, payload construction, checkout hand-off, and webhook delivery.

pub mod checkout;
pub mod cli;
pub mod completion;
pub mod config;
pub mod domain;
pub mod errors;
pub mod payload;
pub mod storage;
pub mod survey;
pub mod utils;
pub mod validation;
pub mod webhook;

#[cfg(test)]
mod test_support;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Assessment Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
