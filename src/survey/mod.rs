//! Step sequencing for the assessment survey.

pub mod routes;
pub mod state;
pub mod steps;

pub use routes::Route;
pub use state::{Direction, NavigationOutcome, OutstandingError, SurveyState};
pub use steps::{Step, StepRange, TOTAL_STEPS};
