use super::super::domain::{Gender, Locale, Metric, Status, System};
use super::super::narrative::NarrativeSource;
use super::super::score::{ActivityLevel, RiskLabel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskView {
    pub score: u8,
    pub label: RiskLabel,
    pub label_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiView {
    pub activity_level: ActivityLevel,
    pub activity_label: String,
    pub classified: usize,
    pub ok: usize,
    pub warn: usize,
    pub risk: usize,
}

/// Value/status pair for one classified metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEntry {
    pub metric: Metric,
    pub system: System,
    pub label: String,
    pub value: String,
    pub status: Status,
    pub status_label: String,
}

/// Row of the metrics table. Readings that are not classified carry no status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub code: String,
    pub generated_on: NaiveDate,
    pub locale: Locale,
    pub person: PersonView,
    pub risk: RiskView,
    pub kpi: KpiView,
    pub systems: Vec<SystemEntry>,
    pub findings: Vec<String>,
    pub actions: Vec<String>,
    pub lifestyle: Vec<String>,
    pub priority_areas: Vec<String>,
    pub metrics: Vec<MetricRow>,
    pub notes: Vec<String>,
    pub narrative: NarrativeSource,
}
