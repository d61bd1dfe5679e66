use super::super::classify::Classifications;
use super::super::domain::{Language, Status, System};
use super::{priority_areas, Narrative, NarrativeSource};

fn concern_phrase(language: Language, status: Status) -> &'static str {
    match (language, status) {
        (Language::En, Status::Risk) => "in the risk range, follow-up advised",
        (Language::En, _) => "outside the target range, keep monitoring",
        (Language::De, Status::Risk) => "im Risikobereich, Nachkontrolle empfohlen",
        (Language::De, _) => "außerhalb des Zielbereichs, weiter beobachten",
    }
}

fn all_clear(language: Language) -> &'static str {
    match language {
        Language::En => "All measured areas are within their target ranges.",
        Language::De => "Alle gemessenen Bereiche liegen im Zielbereich.",
    }
}

fn system_action(language: Language, system: System) -> &'static str {
    match (language, system) {
        (Language::En, System::Cardiovascular) => {
            "Recheck blood pressure and resting heart rate at the next visit."
        }
        (Language::En, System::BodyComposition) => {
            "Agree on a nutrition and activity plan to improve body composition."
        }
        (Language::En, System::Breathing) => "Add daily diaphragmatic breathing practice.",
        (Language::En, System::MobilityStrength) => {
            "Schedule two to three strength and mobility sessions per week."
        }
        (Language::En, System::Balance) => "Include single-leg balance drills in every session.",
        (Language::De, System::Cardiovascular) => {
            "Blutdruck und Ruhepuls beim nächsten Termin erneut messen."
        }
        (Language::De, System::BodyComposition) => {
            "Ernährungs- und Bewegungsplan zur Verbesserung der Körperzusammensetzung vereinbaren."
        }
        (Language::De, System::Breathing) => "Tägliche Zwerchfellatmung einplanen.",
        (Language::De, System::MobilityStrength) => {
            "Zwei bis drei Kraft- und Mobilitätseinheiten pro Woche einplanen."
        }
        (Language::De, System::Balance) => "Einbeinstand-Übungen in jede Einheit aufnehmen.",
    }
}

fn physician_referral(language: Language) -> &'static str {
    match language {
        Language::En => "Book a follow-up assessment with a physician.",
        Language::De => "Eine ärztliche Nachuntersuchung vereinbaren.",
    }
}

fn lifestyle(language: Language) -> [&'static str; 3] {
    match language {
        Language::En => [
            "Aim for at least 150 minutes of moderate activity per week.",
            "Keep a regular sleep schedule of seven to nine hours.",
            "Drink water regularly throughout the day.",
        ],
        Language::De => [
            "Mindestens 150 Minuten moderate Bewegung pro Woche anstreben.",
            "Einen regelmäßigen Schlafrhythmus von sieben bis neun Stunden einhalten.",
            "Über den Tag verteilt regelmäßig Wasser trinken.",
        ],
    }
}

fn standard_note(language: Language) -> &'static str {
    match language {
        Language::En => "Prepared with standard guidance texts.",
        Language::De => "Mit Standard-Hinweistexten erstellt.",
    }
}

/// Deterministic narrative built from fixed sentences keyed on status alone.
pub(crate) fn select_basic(classifications: &Classifications, language: Language) -> Narrative {
    let mut findings: Vec<String> = classifications
        .concerns()
        .map(|(metric, status)| {
            format!(
                "{}: {}",
                metric.label(language),
                concern_phrase(language, status)
            )
        })
        .collect();
    if findings.is_empty() {
        findings.push(all_clear(language).to_string());
    }

    let areas = priority_areas(classifications);
    let mut actions: Vec<String> = areas
        .iter()
        .map(|system| system_action(language, *system).to_string())
        .collect();
    if classifications.count(Status::Risk) > 0 {
        actions.push(physician_referral(language).to_string());
    }

    Narrative {
        findings,
        actions,
        lifestyle: lifestyle(language).iter().map(|line| line.to_string()).collect(),
        notes: vec![standard_note(language).to_string()],
        priority_areas: areas,
        source: NarrativeSource::Basic,
    }
    .capped()
}
