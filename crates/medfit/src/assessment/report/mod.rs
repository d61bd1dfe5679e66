pub mod views;

pub use views::{AssessmentReport, KpiView, MetricRow, PersonView, RiskView, SystemEntry};

use super::classify::Classifications;
use super::domain::{Language, Locale, Metric, MobilityGrade, PersonInfo, Status};
use super::narrative::{Narrative, MAX_NOTES};
use super::normalize::Measurements;
use super::score::{RiskScore, StatusTally};
use chrono::{Datelike, NaiveDate};
use rand::Rng;

pub(crate) struct ReportInput<'a> {
    pub(crate) person: &'a PersonInfo,
    pub(crate) locale: &'a Locale,
    pub(crate) measurements: &'a Measurements,
    pub(crate) classifications: &'a Classifications,
    pub(crate) score: RiskScore,
    pub(crate) narrative: Narrative,
    pub(crate) today: NaiveDate,
}

/// Display code `MF-{LOCALE}-{YYYY}-{MMDD}-{NNN}`. The suffix is random and
/// unchecked, so codes are not unique identifiers.
pub fn report_code<R: Rng + ?Sized>(locale: &Locale, date: NaiveDate, rng: &mut R) -> String {
    format!(
        "MF-{}-{}-{:02}{:02}-{}",
        locale.tag(),
        date.year(),
        date.month(),
        date.day(),
        rng.gen_range(100..=999)
    )
}

pub(crate) fn assemble<R: Rng + ?Sized>(input: ReportInput<'_>, rng: &mut R) -> AssessmentReport {
    let ReportInput {
        person,
        locale,
        measurements,
        classifications,
        score,
        narrative,
        today,
    } = input;
    let language = Language::for_locale(locale);
    let tally = StatusTally::from_classifications(classifications);
    let activity_level = tally.activity_level();

    let systems = classifications
        .iter()
        .map(|(metric, status)| SystemEntry {
            metric,
            system: metric.system(),
            label: metric.label(language).to_string(),
            value: metric_value(metric, measurements)
                .map(|value| with_unit(value, metric.unit()))
                .unwrap_or_default(),
            status,
            status_label: status.label(language).to_string(),
        })
        .collect();

    // The assessor's own note outranks bank notes for the capped slots.
    let mut notes: Vec<String> = person
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string)
        .into_iter()
        .collect();
    notes.extend(narrative.notes);
    notes.truncate(MAX_NOTES);

    AssessmentReport {
        code: report_code(locale, today, rng),
        generated_on: today,
        locale: locale.clone(),
        person: PersonView {
            name: person.name.clone(),
            age: person.age,
            gender: measurements.gender,
            assessor: person.assessor.clone(),
        },
        risk: RiskView {
            score: score.score,
            label: score.label,
            label_text: score.label.label(language).to_string(),
        },
        kpi: KpiView {
            activity_level,
            activity_label: activity_level.label(language).to_string(),
            classified: tally.classified,
            ok: tally.ok,
            warn: tally.warn,
            risk: tally.risk,
        },
        systems,
        findings: narrative.findings,
        actions: narrative.actions,
        lifestyle: narrative.lifestyle,
        priority_areas: narrative
            .priority_areas
            .iter()
            .map(|system| system.label(language).to_string())
            .collect(),
        metrics: metrics_table(measurements, classifications, language),
        notes,
        narrative: narrative.source,
    }
}

fn number(value: f64) -> String {
    format!("{value}")
}

fn with_unit(value: String, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{value} {unit}"),
        None => value,
    }
}

fn metric_value(metric: Metric, measurements: &Measurements) -> Option<String> {
    let m = measurements;
    match metric {
        Metric::BloodPressure => m.blood_pressure_display(),
        Metric::HeartRate => m.heart_rate.map(number),
        Metric::BodyFat => m.body_fat.map(number),
        Metric::WaistHipRatio => m.waist_hip_ratio.map(number),
        Metric::Bmi => m.bmi.map(number),
        Metric::Breathing => m.breathing.as_ref().map(|pattern| pattern.as_str().to_string()),
        Metric::ShoulderMobility => {
            if m.shoulder_left.is_none() && m.shoulder_right.is_none() {
                return None;
            }
            let side = |grade: Option<MobilityGrade>| {
                grade.map(|grade| grade.as_str()).unwrap_or("-")
            };
            Some(format!("{} / {}", side(m.shoulder_left), side(m.shoulder_right)))
        }
        Metric::SitAndReach => m.sit_reach.map(number),
        Metric::Core => m.plank_seconds.map(number),
        Metric::PushUps => m.pushups.map(number),
        Metric::WallSit => m.wallsit_seconds.map(number),
        Metric::BalanceLeft => m.balance_left.map(number),
        Metric::BalanceRight => m.balance_right.map(number),
    }
}

fn metrics_table(
    measurements: &Measurements,
    classifications: &Classifications,
    language: Language,
) -> Vec<MetricRow> {
    let m = measurements;
    let classified = |metric: Metric| {
        (
            metric.key(),
            metric_value(metric, m),
            metric.unit(),
            Some(metric),
        )
    };

    let rows: [(&str, Option<String>, Option<&str>, Option<Metric>); 19] = [
        ("height", m.height.map(number), Some("cm"), None),
        ("weight", m.weight.map(number), Some("kg"), None),
        classified(Metric::Bmi),
        ("waist", m.waist.map(number), Some("cm"), None),
        ("hip", m.hip.map(number), Some("cm"), None),
        classified(Metric::WaistHipRatio),
        classified(Metric::BodyFat),
        classified(Metric::BloodPressure),
        classified(Metric::HeartRate),
        classified(Metric::Core),
        classified(Metric::PushUps),
        classified(Metric::WallSit),
        classified(Metric::SitAndReach),
        classified(Metric::BalanceLeft),
        classified(Metric::BalanceRight),
        classified(Metric::Breathing),
        classified(Metric::ShoulderMobility),
        (
            "foot_strike_left",
            m.foot_strike_left.map(|strike| strike.as_str().to_string()),
            None,
            None,
        ),
        (
            "foot_strike_right",
            m.foot_strike_right.map(|strike| strike.as_str().to_string()),
            None,
            None,
        ),
    ];

    rows.into_iter()
        .filter_map(|(key, value, unit, metric)| {
            let value = value?;
            let status: Option<Status> = metric.and_then(|metric| classifications.get(metric));
            Some(MetricRow {
                key: key.to_string(),
                value,
                unit: unit.map(str::to_string),
                status,
                status_label: status.map(|status| status.label(language).to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::FootStrike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn report_code_has_expected_shape() {
        let locale = Locale::parse("de").expect("locale");
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let code = report_code(&locale, date, &mut rng);
            let (prefix, suffix) = code.split_at(code.len() - 3);
            assert_eq!(prefix, "MF-DE-2025-0307-");
            let suffix: u16 = suffix.parse().expect("numeric suffix");
            assert!((100..=999).contains(&suffix));
        }
    }

    #[test]
    fn metrics_table_lists_unclassified_readings() {
        let measurements = Measurements {
            height: Some(170.0),
            heart_rate: Some(72.0),
            foot_strike_left: Some(FootStrike::Pronation),
            ..Measurements::default()
        };
        let mut classifications = Classifications::default();
        classifications.insert(Metric::HeartRate, Status::Ok);

        let rows = metrics_table(&measurements, &classifications, Language::En);

        let keys: Vec<&str> = rows.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, vec!["height", "heart_rate", "foot_strike_left"]);
        assert_eq!(rows[1].status_label.as_deref(), Some("Good"));
        assert_eq!(rows[2].value, "pronation");
        assert!(rows[2].status.is_none());
    }
}
