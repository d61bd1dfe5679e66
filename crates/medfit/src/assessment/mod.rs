//! Assessment scoring pipeline: normalize raw readings, classify each metric,
//! fold the classifications into a risk score, select narrative text and
//! assemble the report.

pub mod classify;
pub mod domain;
mod engine;
pub mod import;
pub mod narrative;
pub mod normalize;
pub mod report;
pub mod score;

pub use classify::{classify, classify_all, Classifications};
pub use domain::{
    AssessmentSubmission, BreathingPattern, FootStrike, Gender, Language, Locale, Metric,
    MobilityGrade, PersonInfo, Status, System,
};
pub use engine::{
    AssessmentEngine, AssessmentError, AssessmentRecord, Evaluation, NarrativeMode,
};
pub use narrative::{ContentBank, ContentStore, Narrative, NarrativeSource};
pub use normalize::{normalize, FieldValue, Measurements, RawMeasurementSet};
pub use report::AssessmentReport;
pub use score::{ActivityLevel, RiskLabel, RiskScore};
