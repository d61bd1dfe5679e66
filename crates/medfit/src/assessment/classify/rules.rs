use super::super::domain::{Gender, Metric, Status};

/// Threshold shape for a single numeric metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Rule {
    /// Higher is better: `ok` at or above `ok`, `warn` at or above `warn`.
    AtLeast { ok: f64, warn: f64 },
    /// Lower is better: `ok` strictly below `ok`, `warn` up to and including `warn`.
    Below { ok: f64, warn: f64 },
    /// `ok` inside the inclusive band, `warn` inside the optional second band.
    Within {
        ok: (f64, f64),
        warn: Option<(f64, f64)>,
    },
}

impl Rule {
    pub(crate) fn apply(self, value: f64) -> Status {
        match self {
            Rule::AtLeast { ok, warn } => {
                if value >= ok {
                    Status::Ok
                } else if value >= warn {
                    Status::Warn
                } else {
                    Status::Risk
                }
            }
            Rule::Below { ok, warn } => {
                if value < ok {
                    Status::Ok
                } else if value <= warn {
                    Status::Warn
                } else {
                    Status::Risk
                }
            }
            Rule::Within { ok, warn } => {
                if in_band(value, ok) {
                    Status::Ok
                } else if warn.is_some_and(|band| in_band(value, band)) {
                    Status::Warn
                } else {
                    Status::Risk
                }
            }
        }
    }
}

fn in_band(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value <= high
}

const HEART_RATE: Rule = Rule::Within {
    ok: (46.0, 80.0),
    warn: Some((80.0, 100.0)),
};

// Body fat has no warn tier.
const BODY_FAT_MALE: Rule = Rule::Within {
    ok: (8.0, 20.0),
    warn: None,
};
const BODY_FAT_FEMALE: Rule = Rule::Within {
    ok: (14.0, 31.0),
    warn: None,
};

const WAIST_HIP_MALE: Rule = Rule::Below {
    ok: 0.85,
    warn: 0.90,
};
const WAIST_HIP_FEMALE: Rule = Rule::Below {
    ok: 0.75,
    warn: 0.80,
};

// Applied to the one-decimal BMI, so the 24.9/25.0 seam has no gap.
const BMI: Rule = Rule::Within {
    ok: (18.5, 24.9),
    warn: Some((25.0, 29.9)),
};

const BALANCE: Rule = Rule::AtLeast {
    ok: 60.0,
    warn: 29.0,
};

const CORE_MALE: Rule = Rule::AtLeast {
    ok: 180.0,
    warn: 120.0,
};
const CORE_FEMALE: Rule = Rule::AtLeast {
    ok: 120.0,
    warn: 60.0,
};

const PUSH_UPS_MALE: Rule = Rule::AtLeast {
    ok: 20.0,
    warn: 10.0,
};
const PUSH_UPS_FEMALE: Rule = Rule::AtLeast {
    ok: 14.0,
    warn: 7.0,
};

const WALL_SIT_MALE: Rule = Rule::AtLeast {
    ok: 120.0,
    warn: 60.0,
};
const WALL_SIT_FEMALE: Rule = Rule::AtLeast {
    ok: 90.0,
    warn: 45.0,
};

const SIT_AND_REACH_MALE: Rule = Rule::AtLeast {
    ok: 17.0,
    warn: 0.0,
};
const SIT_AND_REACH_FEMALE: Rule = Rule::AtLeast {
    ok: 21.0,
    warn: 1.0,
};

/// Threshold rule for a numeric metric. `None` for categorical metrics and for
/// gender-specific metrics when gender is unknown.
pub(crate) fn numeric_rule(metric: Metric, gender: Option<Gender>) -> Option<Rule> {
    let by_gender = |male: Rule, female: Rule| {
        gender.map(|gender| match gender {
            Gender::Male => male,
            Gender::Female => female,
        })
    };

    match metric {
        Metric::HeartRate => Some(HEART_RATE),
        Metric::Bmi => Some(BMI),
        Metric::BalanceLeft | Metric::BalanceRight => Some(BALANCE),
        Metric::BodyFat => by_gender(BODY_FAT_MALE, BODY_FAT_FEMALE),
        Metric::WaistHipRatio => by_gender(WAIST_HIP_MALE, WAIST_HIP_FEMALE),
        Metric::Core => by_gender(CORE_MALE, CORE_FEMALE),
        Metric::PushUps => by_gender(PUSH_UPS_MALE, PUSH_UPS_FEMALE),
        Metric::WallSit => by_gender(WALL_SIT_MALE, WALL_SIT_FEMALE),
        Metric::SitAndReach => by_gender(SIT_AND_REACH_MALE, SIT_AND_REACH_FEMALE),
        Metric::BloodPressure | Metric::Breathing | Metric::ShoulderMobility => None,
    }
}

pub(crate) fn blood_pressure(systolic: f64, diastolic: f64) -> Status {
    if systolic <= 120.0 && diastolic <= 80.0 {
        Status::Ok
    } else if systolic <= 140.0 && diastolic <= 90.0 {
        Status::Warn
    } else {
        Status::Risk
    }
}
