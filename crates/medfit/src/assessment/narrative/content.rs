use super::super::domain::{Metric, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeSection {
    Findings,
    Actions,
    Lifestyle,
    Notes,
}

impl NarrativeSection {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Findings => "findings",
            Self::Actions => "actions",
            Self::Lifestyle => "lifestyle",
            Self::Notes => "notes",
        }
    }
}

type StatusEntries = BTreeMap<String, Vec<String>>;

/// Localized text snippets keyed `section -> metric -> status`. Keys that do
/// not match a known metric or status are carried but never selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentBank {
    sections: BTreeMap<String, BTreeMap<String, StatusEntries>>,
}

impl ContentBank {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn entries(&self, section: NarrativeSection, metric: Metric, status: Status) -> &[String] {
        self.sections
            .get(section.key())
            .and_then(|metrics| metrics.get(metric.key()))
            .and_then(|statuses| statuses.get(status.key()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when no section holds a single snippet.
    pub fn is_empty(&self) -> bool {
        self.sections
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(BTreeMap::values)
            .all(Vec::is_empty)
    }

    pub fn insert(
        &mut self,
        section: NarrativeSection,
        metric: Metric,
        status: Status,
        text: impl Into<String>,
    ) {
        self.sections
            .entry(section.key().to_string())
            .or_default()
            .entry(metric.key().to_string())
            .or_default()
            .entry(status.key().to_string())
            .or_default()
            .push(text.into());
    }
}
