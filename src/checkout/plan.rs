use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AssessmentError;

/// The three purchasable offerings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Workout,
    Meal,
    Combined,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Workout, Plan::Meal, Plan::Combined];

    pub fn sku(self) -> &'static str {
        match self {
            Plan::Workout => "workout",
            Plan::Meal => "meal",
            Plan::Combined => "combined",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Plan::Workout => "Personal workout plan",
            Plan::Meal => "Personal meal plan",
            Plan::Combined => "Workout + meal plan bundle",
        }
    }

    pub fn from_sku(value: &str) -> Option<Plan> {
        let needle = value.trim();
        Plan::ALL
            .into_iter()
            .find(|plan| plan.sku().eq_ignore_ascii_case(needle))
    }

    pub fn includes_meal(self) -> bool {
        matches!(self, Plan::Meal | Plan::Combined)
    }

    pub fn includes_workout(self) -> bool {
        matches!(self, Plan::Workout | Plan::Combined)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sku())
    }
}

impl FromStr for Plan {
    type Err = AssessmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Plan::from_sku(value).ok_or_else(|| AssessmentError::UnknownPlan(value.trim().to_string()))
    }
}

/// Processor price identifier for each plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable {
    pub workout: String,
    pub meal: String,
    pub combined: String,
}

impl PriceTable {
    pub fn price_for(&self, plan: Plan) -> &str {
        match plan {
            Plan::Workout => &self.workout,
            Plan::Meal => &self.meal,
            Plan::Combined => &self.combined,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            workout: "price_workout_plan_default".into(),
            meal: "price_meal_plan_default".into(),
            combined: "price_combined_plan_default".into(),
        }
    }
}
