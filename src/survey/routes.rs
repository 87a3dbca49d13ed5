use std::fmt;

use url::Url;

/// Screens the application can be opened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    /// The survey, optionally at a specific step after a reload.
    Form { step: Option<usize> },
    PaymentSuccess,
    PaymentCanceled,
    NotFound,
}

impl Route {
    /// Resolves a path (or absolute URL) to a route. Query strings and
    /// fragments are ignored here; the checkout return handler reads them.
    pub fn parse(input: &str) -> Route {
        let path = match Url::parse(input) {
            Ok(url) => url.path().to_string(),
            Err(_) => input
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Landing,
            ["form"] => Route::Form { step: None },
            ["form", step] => match step.parse::<usize>() {
                Ok(number) if number >= 1 => Route::Form {
                    step: Some(number),
                },
                _ => Route::NotFound,
            },
            ["payment-success"] => Route::PaymentSuccess,
            ["payment-canceled"] => Route::PaymentCanceled,
            _ => Route::NotFound,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Landing => f.write_str("/"),
            Route::Form { step: None } => f.write_str("/form"),
            Route::Form { step: Some(step) } => write!(f, "/form/{step}"),
            Route::PaymentSuccess => f.write_str("/payment-success"),
            Route::PaymentCanceled => f.write_str("/payment-canceled"),
            Route::NotFound => f.write_str("/404"),
        }
    }
}
