mod rules;

use super::domain::{BreathingPattern, Gender, Metric, MobilityGrade, Status};
use super::normalize::Measurements;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-metric statuses for one measurement set. Metrics without a usable
/// reading are absent, which keeps them out of the score denominator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classifications {
    entries: BTreeMap<Metric, Status>,
}

impl Classifications {
    pub fn get(&self, metric: Metric) -> Option<Status> {
        self.entries.get(&metric).copied()
    }

    pub fn insert(&mut self, metric: Metric, status: Status) -> Option<Status> {
        self.entries.insert(metric, status)
    }

    /// Entries in narrative priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Status)> + '_ {
        self.entries
            .iter()
            .map(|(metric, status)| (*metric, *status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, status: Status) -> usize {
        self.entries.values().filter(|value| **value == status).count()
    }

    pub fn concerns(&self) -> impl Iterator<Item = (Metric, Status)> + '_ {
        self.iter().filter(|(_, status)| status.is_concern())
    }
}

impl FromIterator<(Metric, Status)> for Classifications {
    fn from_iter<I: IntoIterator<Item = (Metric, Status)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Classify a single numeric reading. Returns `None` for categorical metrics,
/// blood pressure (two readings), non-finite values and gender-specific
/// metrics without a gender.
pub fn classify_value(metric: Metric, value: f64, gender: Option<Gender>) -> Option<Status> {
    if !value.is_finite() {
        return None;
    }
    rules::numeric_rule(metric, gender).map(|rule| rule.apply(value))
}

pub fn classify_blood_pressure(systolic: f64, diastolic: f64) -> Option<Status> {
    (systolic.is_finite() && diastolic.is_finite())
        .then(|| rules::blood_pressure(systolic, diastolic))
}

pub fn classify_breathing(pattern: &BreathingPattern) -> Status {
    match pattern {
        BreathingPattern::Normal => Status::Ok,
        BreathingPattern::Other(_) => Status::Risk,
    }
}

/// Worst of the sides that were graded.
pub fn classify_shoulder(left: Option<MobilityGrade>, right: Option<MobilityGrade>) -> Option<Status> {
    left.into_iter()
        .chain(right)
        .map(|grade| match grade {
            MobilityGrade::Good => Status::Ok,
            MobilityGrade::Normal => Status::Warn,
            MobilityGrade::Poor => Status::Risk,
        })
        .max()
}

pub fn classify(metric: Metric, measurements: &Measurements) -> Option<Status> {
    let gender = measurements.gender;
    let numeric = |value: Option<f64>| value.and_then(|value| classify_value(metric, value, gender));

    match metric {
        Metric::BloodPressure => match (measurements.systolic, measurements.diastolic) {
            (Some(systolic), Some(diastolic)) => classify_blood_pressure(systolic, diastolic),
            _ => None,
        },
        Metric::HeartRate => numeric(measurements.heart_rate),
        Metric::BodyFat => numeric(measurements.body_fat),
        Metric::WaistHipRatio => numeric(measurements.waist_hip_ratio),
        Metric::Bmi => numeric(measurements.bmi),
        Metric::Breathing => measurements.breathing.as_ref().map(classify_breathing),
        Metric::ShoulderMobility => {
            classify_shoulder(measurements.shoulder_left, measurements.shoulder_right)
        }
        Metric::SitAndReach => numeric(measurements.sit_reach),
        Metric::Core => numeric(measurements.plank_seconds),
        Metric::PushUps => numeric(measurements.pushups),
        Metric::WallSit => numeric(measurements.wallsit_seconds),
        Metric::BalanceLeft => numeric(measurements.balance_left),
        Metric::BalanceRight => numeric(measurements.balance_right),
    }
}

pub fn classify_all(measurements: &Measurements) -> Classifications {
    Metric::ordered()
        .into_iter()
        .filter_map(|metric| match classify(metric, measurements) {
            Some(status) => Some((metric, status)),
            None => {
                debug!(metric = metric.key(), "metric excluded from scoring");
                None
            }
        })
        .collect()
}
