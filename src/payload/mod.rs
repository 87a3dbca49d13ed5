//! Outbound webhook payload and the derived values it carries.

mod builder;
pub mod metrics;

pub use builder::{
    build_payload, ActivityProfile, AssessmentPayload, BodyProfile, Demographics, GoalMetrics,
    HealthStatus, Lifestyle, Metadata, PayloadContext, ProgramTiming, SelfAssessments,
    DEFAULT_SOURCE,
};
pub use metrics::{
    bmi, fitness_score, weight_change, Bmi, BmiCategory, ChangeMagnitude, FitnessLevel,
    FitnessScore, WeightChange, WeightDirection,
};
