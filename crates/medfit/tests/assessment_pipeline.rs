use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::NaiveDate;
use medfit::assessment::narrative::{MAX_ACTIONS, MAX_FINDINGS, MAX_PRIORITY_AREAS};
use medfit::assessment::{
    AssessmentEngine, AssessmentError, AssessmentRecord, AssessmentSubmission, ContentStore,
    Metric, NarrativeMode, NarrativeSource, RiskLabel, Status,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

fn engine() -> AssessmentEngine {
    let capacity = NonZeroUsize::new(4).expect("non-zero capacity");
    AssessmentEngine::new(Arc::new(ContentStore::new(None, capacity)))
}

fn assessed_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid assessment date")
}

fn fit_male() -> Value {
    json!({
        "systolic": 118, "diastolic": 76, "heart_rate": 68, "gender": "male",
        "body_fat": 15, "waist": 80, "hip": 95, "height": 178, "weight": 75,
        "plank_minutes": 3, "plank_seconds": 0, "pushup_count": 22,
        "wallsit_minutes": 2, "wallsit_seconds": 0, "sit_reach": 18,
        "balance_left": 65, "balance_right": 62, "breathing": "normal"
    })
}

fn submission(measurements: Value, locale: Option<&str>) -> AssessmentSubmission {
    let mut body = json!({
        "person": { "name": "Jonas Weber", "age": 41, "assessor": "Coach Lena" },
        "measurements": measurements,
    });
    if let Some(locale) = locale {
        body["locale"] = json!(locale);
    }
    serde_json::from_value(body).expect("submission deserializes")
}

fn with(mut measurements: Value, overrides: Value) -> Value {
    let target = measurements.as_object_mut().expect("measurement object");
    for (key, value) in overrides.as_object().expect("override object") {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
    measurements
}

#[test]
fn healthy_profile_scores_full_marks() {
    let engine = engine();
    let evaluation = engine
        .evaluate(&submission(fit_male(), None))
        .expect("classifiable set");

    assert_eq!(evaluation.measurements.bmi, Some(23.7));
    assert_eq!(evaluation.measurements.waist_hip_ratio, Some(0.84));
    assert_eq!(evaluation.measurements.plank_seconds, Some(180.0));
    assert_eq!(evaluation.classifications.len(), 12);
    assert!(evaluation
        .classifications
        .iter()
        .all(|(_, status)| status == Status::Ok));
    assert_eq!(evaluation.score.score, 100);
    assert_eq!(evaluation.score.label, RiskLabel::Low);
}

#[test]
fn hypertensive_reading_lowers_the_score() {
    let engine = engine();
    let baseline = engine
        .evaluate(&submission(fit_male(), None))
        .expect("baseline evaluates");
    let hypertensive = engine
        .evaluate(&submission(
            with(fit_male(), json!({ "systolic": 170, "diastolic": 105 })),
            None,
        ))
        .expect("hypertensive set evaluates");

    assert_eq!(
        hypertensive.classifications.get(Metric::BloodPressure),
        Some(Status::Risk)
    );
    assert!(hypertensive.score.score < baseline.score.score);
    assert_eq!(hypertensive.score.score, 94);
}

#[test]
fn male_body_fat_above_band_is_risk() {
    let evaluation = engine()
        .evaluate(&submission(json!({ "body_fat": 25, "gender": "male" }), None))
        .expect("body fat classifies");

    assert_eq!(evaluation.classifications.get(Metric::BodyFat), Some(Status::Risk));
    assert_eq!(evaluation.classifications.len(), 1);
}

#[test]
fn female_zero_plank_is_risk() {
    let evaluation = engine()
        .evaluate(&submission(
            json!({ "gender": "female", "plank_minutes": 0, "plank_seconds": 0 }),
            None,
        ))
        .expect("core classifies");

    assert_eq!(evaluation.measurements.plank_seconds, Some(0.0));
    assert_eq!(evaluation.classifications.get(Metric::Core), Some(Status::Risk));
}

#[test]
fn missing_hip_shrinks_the_denominator() {
    let engine = engine();
    let central_fat = with(fit_male(), json!({ "waist": 90 }));

    let with_hip = engine
        .evaluate(&submission(central_fat.clone(), None))
        .expect("full set evaluates");
    let without_hip = engine
        .evaluate(&submission(with(central_fat, json!({ "hip": null })), None))
        .expect("partial set evaluates");

    assert_eq!(
        with_hip.classifications.get(Metric::WaistHipRatio),
        Some(Status::Risk)
    );
    assert_eq!(with_hip.classifications.len(), 12);
    assert_eq!(with_hip.score.score, 94);

    assert!(without_hip.measurements.waist_hip_ratio.is_none());
    assert!(without_hip.classifications.get(Metric::WaistHipRatio).is_none());
    assert_eq!(without_hip.classifications.len(), 11);
    assert_eq!(without_hip.score.score, 100);
}

#[test]
fn text_inputs_with_decimal_commas_are_accepted() {
    let evaluation = engine()
        .evaluate(&submission(
            json!({ "gender": "M", "body_fat": "18,5", "heart_rate": " 72 ", "sit_reach": "n/a" }),
            None,
        ))
        .expect("text readings classify");

    assert_eq!(evaluation.measurements.body_fat, Some(18.5));
    assert_eq!(evaluation.classifications.get(Metric::BodyFat), Some(Status::Ok));
    assert_eq!(evaluation.classifications.get(Metric::HeartRate), Some(Status::Ok));
    assert!(evaluation.classifications.get(Metric::SitAndReach).is_none());
}

#[test]
fn mistyped_fields_do_not_sink_the_submission() {
    let submission = submission(
        json!({
            "systolic": "118", "diastolic": "76", "heart_rate": true,
            "balance_left": [65], "balance_right": { "seconds": 62 }
        }),
        None,
    );

    let report = engine()
        .assess(&submission, assessed_on())
        .expect("valid readings still score");

    assert_eq!(report.kpi.classified, 1);
    assert_eq!(report.systems[0].metric, Metric::BloodPressure);
    assert_eq!(report.risk.score, 100);
}

#[test]
fn basic_mode_is_reported_by_the_engine() {
    assert_eq!(engine().mode(), NarrativeMode::Rich);
    assert_eq!(engine().with_basic_narrative().mode(), NarrativeMode::Basic);
}

#[test]
fn empty_measurement_set_is_an_error() {
    let result = engine().assess(&submission(json!({}), None), assessed_on());
    assert_eq!(result, Err(AssessmentError::NoClassifiableMetrics));
}

#[test]
fn rich_narrative_stays_within_caps() {
    let engine = engine();
    let struggling = json!({
        "systolic": 165, "diastolic": 100, "heart_rate": 104, "gender": "female",
        "body_fat": 38, "waist": 98, "hip": 104, "height": 165, "weight": 92,
        "plank_seconds": 20, "pushup_count": 2, "wallsit_seconds": 25, "sit_reach": -4,
        "balance_left": 10, "balance_right": 14, "breathing": "chest",
        "shoulder_left": "poor", "shoulder_right": "normal"
    });
    let submission = submission(struggling, Some("en"));

    for seed in [1_u64, 2, 3, 4] {
        let report = engine
            .assess_with_rng(&submission, assessed_on(), &mut StdRng::seed_from_u64(seed))
            .expect("report generated");

        assert_eq!(report.narrative, NarrativeSource::Rich);
        assert!(!report.findings.is_empty());
        assert!(report.findings.len() <= MAX_FINDINGS);
        assert!(report.actions.len() <= MAX_ACTIONS);
        assert!(report.priority_areas.len() <= MAX_PRIORITY_AREAS);
        assert_eq!(report.risk.label, RiskLabel::High);
        assert_eq!(report.kpi.ok, 0);
    }
}

#[test]
fn seeded_reports_are_reproducible() {
    let engine = engine();
    let submission = submission(
        with(fit_male(), json!({ "systolic": 150, "diastolic": 95 })),
        Some("en"),
    );

    let first = engine
        .assess_with_rng(&submission, assessed_on(), &mut StdRng::seed_from_u64(99))
        .expect("first report");
    let second = engine
        .assess_with_rng(&submission, assessed_on(), &mut StdRng::seed_from_u64(99))
        .expect("second report");

    assert_eq!(first, second);
    assert!(first.code.starts_with("MF-EN-2025-0614-"));
}

#[test]
fn german_basic_report_is_localized() {
    let engine = engine().with_basic_narrative();
    let report = engine
        .assess(
            &submission(with(fit_male(), json!({ "heart_rate": 92 })), Some("de")),
            assessed_on(),
        )
        .expect("report generated");

    assert_eq!(report.narrative, NarrativeSource::Basic);
    assert!(report.code.starts_with("MF-DE-2025-0614-"));
    assert_eq!(report.risk.label_text, "Niedrig");
    assert_eq!(report.findings.len(), 1);
    assert!(report.findings[0].starts_with("Ruhepuls"));
    let heart_rate = report
        .systems
        .iter()
        .find(|entry| entry.metric == Metric::HeartRate)
        .expect("heart rate entry");
    assert_eq!(heart_rate.status_label, "Mittel");
}

#[test]
fn unknown_locale_falls_back_to_basic_english() {
    let report = engine()
        .assess(&submission(fit_male(), Some("fr")), assessed_on())
        .expect("report generated");

    assert_eq!(report.narrative, NarrativeSource::Basic);
    assert!(report.code.starts_with("MF-FR-"));
    assert_eq!(report.risk.label_text, "Low");
}

#[test]
fn regenerate_replaces_report_from_stored_submission() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(5);
    let record = engine
        .record(submission(fit_male(), Some("de")), assessed_on(), &mut rng)
        .expect("record created");

    let stored = serde_json::to_string(&record).expect("record serializes");
    let restored: AssessmentRecord = serde_json::from_str(&stored).expect("record deserializes");
    assert_eq!(restored, record);

    let later = NaiveDate::from_ymd_opt(2025, 9, 2).expect("valid date");
    let regenerated = engine
        .regenerate(&restored, later, &mut rng)
        .expect("record regenerated");

    assert_eq!(regenerated.submission, record.submission);
    assert_eq!(regenerated.report.generated_on, later);
    assert!(regenerated.report.code.starts_with("MF-DE-2025-0902-"));
    assert_eq!(regenerated.report.risk, record.report.risk);
    assert_eq!(regenerated.report.metrics, record.report.metrics);
}

#[test]
fn assessor_note_is_kept_in_report() {
    let mut submission = submission(fit_male(), None);
    submission.person.notes = Some("  Knee surgery in 2021.  ".to_string());

    let report = engine()
        .assess(&submission, assessed_on())
        .expect("report generated");

    assert_eq!(report.notes.first().map(String::as_str), Some("Knee surgery in 2021."));
    assert_eq!(report.person.assessor.as_deref(), Some("Coach Lena"));
}
