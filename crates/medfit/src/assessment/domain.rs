use serde::{Deserialize, Serialize};
use std::fmt;

use super::normalize::RawMeasurementSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "man" => Some(Self::Male),
            "female" | "f" | "woman" => Some(Self::Female),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Three-state tier assigned to one measurement. Ordered so that `Risk` is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Warn,
    Risk,
}

impl Status {
    pub const fn weight(self) -> u32 {
        match self {
            Self::Ok => 3,
            Self::Warn => 2,
            Self::Risk => 1,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Risk => "risk",
        }
    }

    pub const fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::Ok) => "Good",
            (Language::En, Self::Warn) => "Medium",
            (Language::En, Self::Risk) => "Risky",
            (Language::De, Self::Ok) => "Gut",
            (Language::De, Self::Warn) => "Mittel",
            (Language::De, Self::Risk) => "Riskant",
        }
    }

    pub fn is_concern(self) -> bool {
        self != Self::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathingPattern {
    Normal,
    Other(String),
}

impl BreathingPattern {
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "" => None,
            "normal" => Some(Self::Normal),
            _ => Some(Self::Other(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::Other(category) => category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobilityGrade {
    Good,
    Normal,
    Poor,
}

impl MobilityGrade {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "good" => Some(Self::Good),
            "normal" => Some(Self::Normal),
            "poor" | "risky" => Some(Self::Poor),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Normal => "normal",
            Self::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootStrike {
    Neutral,
    Pronation,
    Supination,
}

impl FootStrike {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "neutral" | "normal" => Some(Self::Neutral),
            "pronation" | "overpronation" | "pronated" => Some(Self::Pronation),
            "supination" | "underpronation" | "supinated" => Some(Self::Supination),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Pronation => "pronation",
            Self::Supination => "supination",
        }
    }
}

/// Body system a metric reports on. Declaration order is narrative priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum System {
    Cardiovascular,
    BodyComposition,
    Breathing,
    MobilityStrength,
    Balance,
}

impl System {
    pub const fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::Cardiovascular) => "Cardiovascular health",
            (Language::En, Self::BodyComposition) => "Body composition",
            (Language::En, Self::Breathing) => "Breathing",
            (Language::En, Self::MobilityStrength) => "Mobility & strength",
            (Language::En, Self::Balance) => "Balance",
            (Language::De, Self::Cardiovascular) => "Herz-Kreislauf",
            (Language::De, Self::BodyComposition) => "Körperzusammensetzung",
            (Language::De, Self::Breathing) => "Atmung",
            (Language::De, Self::MobilityStrength) => "Beweglichkeit & Kraft",
            (Language::De, Self::Balance) => "Gleichgewicht",
        }
    }
}

/// Classified metric. Declaration order is narrative priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    BloodPressure,
    HeartRate,
    BodyFat,
    WaistHipRatio,
    Bmi,
    Breathing,
    ShoulderMobility,
    SitAndReach,
    Core,
    PushUps,
    WallSit,
    BalanceLeft,
    BalanceRight,
}

impl Metric {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::BloodPressure,
            Self::HeartRate,
            Self::BodyFat,
            Self::WaistHipRatio,
            Self::Bmi,
            Self::Breathing,
            Self::ShoulderMobility,
            Self::SitAndReach,
            Self::Core,
            Self::PushUps,
            Self::WallSit,
            Self::BalanceLeft,
            Self::BalanceRight,
        ]
    }

    /// Key used by content banks and the metrics table.
    pub const fn key(self) -> &'static str {
        match self {
            Self::BloodPressure => "blood_pressure",
            Self::HeartRate => "heart_rate",
            Self::BodyFat => "body_fat",
            Self::WaistHipRatio => "waist_hip_ratio",
            Self::Bmi => "bmi",
            Self::Breathing => "breathing",
            Self::ShoulderMobility => "shoulder_mobility",
            Self::SitAndReach => "sit_and_reach",
            Self::Core => "core",
            Self::PushUps => "push_ups",
            Self::WallSit => "wall_sit",
            Self::BalanceLeft => "balance_left",
            Self::BalanceRight => "balance_right",
        }
    }

    pub const fn system(self) -> System {
        match self {
            Self::BloodPressure | Self::HeartRate => System::Cardiovascular,
            Self::BodyFat | Self::WaistHipRatio | Self::Bmi => System::BodyComposition,
            Self::Breathing => System::Breathing,
            Self::ShoulderMobility
            | Self::SitAndReach
            | Self::Core
            | Self::PushUps
            | Self::WallSit => System::MobilityStrength,
            Self::BalanceLeft | Self::BalanceRight => System::Balance,
        }
    }

    pub const fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::BloodPressure) => "Blood pressure",
            (Language::En, Self::HeartRate) => "Resting heart rate",
            (Language::En, Self::BodyFat) => "Body fat",
            (Language::En, Self::WaistHipRatio) => "Waist-hip ratio",
            (Language::En, Self::Bmi) => "BMI",
            (Language::En, Self::Breathing) => "Breathing pattern",
            (Language::En, Self::ShoulderMobility) => "Shoulder mobility",
            (Language::En, Self::SitAndReach) => "Sit and reach",
            (Language::En, Self::Core) => "Core endurance (plank)",
            (Language::En, Self::PushUps) => "Push-ups",
            (Language::En, Self::WallSit) => "Wall sit",
            (Language::En, Self::BalanceLeft) => "Single-leg balance (left)",
            (Language::En, Self::BalanceRight) => "Single-leg balance (right)",
            (Language::De, Self::BloodPressure) => "Blutdruck",
            (Language::De, Self::HeartRate) => "Ruhepuls",
            (Language::De, Self::BodyFat) => "Körperfett",
            (Language::De, Self::WaistHipRatio) => "Taille-Hüft-Verhältnis",
            (Language::De, Self::Bmi) => "BMI",
            (Language::De, Self::Breathing) => "Atemmuster",
            (Language::De, Self::ShoulderMobility) => "Schulterbeweglichkeit",
            (Language::De, Self::SitAndReach) => "Sitz-Reichweite",
            (Language::De, Self::Core) => "Rumpfkraft (Plank)",
            (Language::De, Self::PushUps) => "Liegestütze",
            (Language::De, Self::WallSit) => "Wandsitzen",
            (Language::De, Self::BalanceLeft) => "Einbeinstand (links)",
            (Language::De, Self::BalanceRight) => "Einbeinstand (rechts)",
        }
    }

    pub const fn unit(self) -> Option<&'static str> {
        match self {
            Self::BloodPressure => Some("mmHg"),
            Self::HeartRate => Some("bpm"),
            Self::BodyFat => Some("%"),
            Self::SitAndReach => Some("cm"),
            Self::Core | Self::WallSit | Self::BalanceLeft | Self::BalanceRight => Some("s"),
            Self::WaistHipRatio
            | Self::Bmi
            | Self::Breathing
            | Self::ShoulderMobility
            | Self::PushUps => None,
        }
    }
}

/// Language used for static labels. Locales without a dedicated table render in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    De,
}

impl Language {
    pub fn for_locale(locale: &Locale) -> Self {
        match locale.as_str() {
            "de" => Self::De,
            _ => Self::En,
        }
    }
}

/// Two-letter lowercase locale tag, e.g. `en`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().to_ascii_lowercase();
        if value.len() == 2 && value.bytes().all(|byte| byte.is_ascii_lowercase()) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case form used in report codes.
    pub fn tag(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{value}' is not a two-letter locale tag"))
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One submission event: who was assessed and the raw readings collected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub person: PersonInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    #[serde(default)]
    pub measurements: RawMeasurementSet,
}
