use super::classify::Classifications;
use super::domain::{Language, Status};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Low,
    Medium,
    MediumHigh,
    High,
}

impl RiskLabel {
    pub const fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Low
        } else if score >= 60 {
            Self::Medium
        } else if score >= 40 {
            Self::MediumHigh
        } else {
            Self::High
        }
    }

    pub const fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::Low) => "Low",
            (Language::En, Self::Medium) => "Medium",
            (Language::En, Self::MediumHigh) => "Medium-High",
            (Language::En, Self::High) => "High",
            (Language::De, Self::Low) => "Niedrig",
            (Language::De, Self::Medium) => "Mittel",
            (Language::De, Self::MediumHigh) => "Mittel-Hoch",
            (Language::De, Self::High) => "Hoch",
        }
    }
}

/// Display KPI derived from the number of `ok` metrics; does not feed the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    pub const fn from_ok_count(ok: usize) -> Self {
        if ok >= 8 {
            Self::High
        } else if ok >= 5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::Low) => "Low",
            (Language::En, Self::Medium) => "Medium",
            (Language::En, Self::High) => "High",
            (Language::De, Self::Low) => "Niedrig",
            (Language::De, Self::Medium) => "Mittel",
            (Language::De, Self::High) => "Hoch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub score: u8,
    pub label: RiskLabel,
}

impl RiskScore {
    /// `round(100 * Σweight / (3 * N))`; `None` when nothing was classified.
    pub fn from_classifications(classifications: &Classifications) -> Option<Self> {
        let count = classifications.len();
        if count == 0 {
            return None;
        }

        let total: u32 = classifications
            .iter()
            .map(|(_, status)| status.weight())
            .sum();
        let max = 3 * count as u32;
        let score = (100.0 * f64::from(total) / f64::from(max)).round();
        let score = score.clamp(0.0, 100.0) as u8;

        Some(Self {
            score,
            label: RiskLabel::from_score(score),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    pub classified: usize,
    pub ok: usize,
    pub warn: usize,
    pub risk: usize,
}

impl StatusTally {
    pub fn from_classifications(classifications: &Classifications) -> Self {
        Self {
            classified: classifications.len(),
            ok: classifications.count(Status::Ok),
            warn: classifications.count(Status::Warn),
            risk: classifications.count(Status::Risk),
        }
    }

    pub fn activity_level(&self) -> ActivityLevel {
        ActivityLevel::from_ok_count(self.ok)
    }
}
