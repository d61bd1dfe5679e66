//! Findings, actions and lifestyle text for a classified measurement set.
//!
//! Two paths exist. The rich path draws one random snippet per slot from a
//! localized [`ContentBank`]; the basic path builds a fixed, deterministic set
//! of sentences and is used whenever no bank is available for the locale.

mod basic;
mod content;
mod store;

pub use content::{ContentBank, NarrativeSection};
pub use store::{ContentError, ContentStore};

use super::classify::Classifications;
use super::domain::{Language, Metric, Status, System};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_FINDINGS: usize = 6;
pub const MAX_ACTIONS: usize = 7;
pub const MAX_LIFESTYLE: usize = 5;
pub const MAX_NOTES: usize = 3;
pub const MAX_PRIORITY_AREAS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Rich,
    Basic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub findings: Vec<String>,
    pub actions: Vec<String>,
    pub lifestyle: Vec<String>,
    pub notes: Vec<String>,
    pub priority_areas: Vec<System>,
    pub source: NarrativeSource,
}

impl Narrative {
    fn capped(mut self) -> Self {
        self.findings.truncate(MAX_FINDINGS);
        self.actions.truncate(MAX_ACTIONS);
        self.lifestyle.truncate(MAX_LIFESTYLE);
        self.notes.truncate(MAX_NOTES);
        self.priority_areas.truncate(MAX_PRIORITY_AREAS);
        self
    }
}

/// Systems with at least one `warn` or `risk` metric, in priority order.
pub(crate) fn priority_areas(classifications: &Classifications) -> Vec<System> {
    let mut areas: Vec<System> = Vec::new();
    for (metric, _) in classifications.concerns() {
        let system = metric.system();
        if !areas.contains(&system) {
            areas.push(system);
        }
    }
    areas
}

/// Pick the narrative for `classifications`. A missing or empty bank selects the basic path.
pub fn select<R: Rng + ?Sized>(
    bank: Option<&ContentBank>,
    classifications: &Classifications,
    language: Language,
    rng: &mut R,
) -> Narrative {
    let narrative = match bank {
        Some(bank) if !bank.is_empty() => select_rich(bank, classifications, rng),
        _ => basic::select_basic(classifications, language),
    };
    debug!(
        source = ?narrative.source,
        findings = narrative.findings.len(),
        actions = narrative.actions.len(),
        "narrative selected"
    );
    narrative
}

pub fn select_basic(classifications: &Classifications, language: Language) -> Narrative {
    basic::select_basic(classifications, language)
}

pub fn select_rich<R: Rng + ?Sized>(
    bank: &ContentBank,
    classifications: &Classifications,
    rng: &mut R,
) -> Narrative {
    // Concerns lead; `ok` metrics only contribute where the bank has celebratory text.
    let slots: Vec<(Metric, Status)> = classifications
        .concerns()
        .chain(classifications.iter().filter(|(_, status)| !status.is_concern()))
        .collect();

    let mut draw = |section: NarrativeSection| -> Vec<String> {
        slots
            .iter()
            .filter_map(|(metric, status)| {
                bank.entries(section, *metric, *status)
                    .choose(&mut *rng)
                    .cloned()
            })
            .collect()
    };

    Narrative {
        findings: draw(NarrativeSection::Findings),
        actions: draw(NarrativeSection::Actions),
        lifestyle: draw(NarrativeSection::Lifestyle),
        notes: draw(NarrativeSection::Notes),
        priority_areas: priority_areas(classifications),
        source: NarrativeSource::Rich,
    }
    .capped()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classifications(entries: &[(Metric, Status)]) -> Classifications {
        entries.iter().copied().collect()
    }

    fn crowded_bank() -> ContentBank {
        let mut bank = ContentBank::default();
        for metric in Metric::ordered() {
            for status in [Status::Ok, Status::Warn, Status::Risk] {
                for section in [
                    NarrativeSection::Findings,
                    NarrativeSection::Actions,
                    NarrativeSection::Lifestyle,
                    NarrativeSection::Notes,
                ] {
                    for variant in 0..3 {
                        bank.insert(
                            section,
                            metric,
                            status,
                            format!("{} {} {variant}", metric.key(), status.key()),
                        );
                    }
                }
            }
        }
        bank
    }

    fn all_risk() -> Classifications {
        Metric::ordered()
            .into_iter()
            .map(|metric| (metric, Status::Risk))
            .collect()
    }

    #[test]
    fn rich_selection_respects_caps() {
        let bank = crowded_bank();
        let mut rng = StdRng::seed_from_u64(7);

        let narrative = select(Some(&bank), &all_risk(), Language::En, &mut rng);

        assert_eq!(narrative.source, NarrativeSource::Rich);
        assert_eq!(narrative.findings.len(), MAX_FINDINGS);
        assert_eq!(narrative.actions.len(), MAX_ACTIONS);
        assert_eq!(narrative.lifestyle.len(), MAX_LIFESTYLE);
        assert_eq!(narrative.notes.len(), MAX_NOTES);
        assert_eq!(
            narrative.priority_areas,
            vec![
                System::Cardiovascular,
                System::BodyComposition,
                System::Breathing
            ]
        );
    }

    #[test]
    fn concerns_come_before_celebrations() {
        let bank = crowded_bank();
        let mut rng = StdRng::seed_from_u64(1);
        let set = classifications(&[
            (Metric::BloodPressure, Status::Ok),
            (Metric::BalanceRight, Status::Warn),
        ]);

        let narrative = select_rich(&bank, &set, &mut rng);

        assert!(narrative.findings[0].starts_with("balance_right warn"));
        assert!(narrative.findings[1].starts_with("blood_pressure ok"));
        assert_eq!(narrative.priority_areas, vec![System::Balance]);
    }

    #[test]
    fn seeded_rng_makes_selection_reproducible() {
        let bank = crowded_bank();
        let set = all_risk();

        let first = select_rich(&bank, &set, &mut StdRng::seed_from_u64(42));
        let second = select_rich(&bank, &set, &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }

    #[test]
    fn sparse_bank_skips_missing_keys() {
        let mut bank = ContentBank::default();
        bank.insert(
            NarrativeSection::Findings,
            Metric::HeartRate,
            Status::Warn,
            "Heart rate is elevated.",
        );
        let set = classifications(&[
            (Metric::HeartRate, Status::Warn),
            (Metric::Bmi, Status::Risk),
        ]);

        let narrative = select(Some(&bank), &set, Language::En, &mut StdRng::seed_from_u64(3));

        assert_eq!(narrative.findings, vec!["Heart rate is elevated.".to_string()]);
        assert!(narrative.actions.is_empty());
    }

    #[test]
    fn missing_or_empty_bank_falls_back_to_basic() {
        let set = classifications(&[
            (Metric::BloodPressure, Status::Risk),
            (Metric::Core, Status::Warn),
        ]);
        let mut rng = StdRng::seed_from_u64(9);

        let without = select(None, &set, Language::En, &mut rng);
        let empty = select(Some(&ContentBank::default()), &set, Language::En, &mut rng);

        assert_eq!(without.source, NarrativeSource::Basic);
        assert_eq!(without, empty);
        assert_eq!(
            without.findings,
            vec![
                "Blood pressure: in the risk range, follow-up advised".to_string(),
                "Core endurance (plank): outside the target range, keep monitoring".to_string(),
            ]
        );
        assert_eq!(without.actions.len(), 3);
        assert_eq!(
            without.priority_areas,
            vec![System::Cardiovascular, System::MobilityStrength]
        );
    }

    #[test]
    fn basic_path_is_deterministic_and_localized() {
        let set = all_risk();

        let english = select_basic(&set, Language::En);
        let german = select_basic(&set, Language::De);

        assert_eq!(english, select_basic(&set, Language::En));
        assert_eq!(english.findings.len(), MAX_FINDINGS);
        assert_eq!(english.priority_areas.len(), MAX_PRIORITY_AREAS);
        assert!(german.findings[0].starts_with("Blutdruck"));
    }

    #[test]
    fn basic_path_reports_all_clear() {
        let set = classifications(&[(Metric::HeartRate, Status::Ok)]);
        let narrative = select_basic(&set, Language::En);
        assert_eq!(narrative.findings.len(), 1);
        assert!(narrative.actions.is_empty());
        assert!(narrative.priority_areas.is_empty());
    }
}
