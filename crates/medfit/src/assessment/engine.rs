use super::classify::{classify_all, Classifications};
use super::domain::{AssessmentSubmission, Language, Locale};
use super::narrative::{self, ContentStore};
use super::normalize::{normalize, Measurements};
use super::report::{assemble, AssessmentReport, ReportInput};
use super::score::RiskScore;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("measurement set has no classifiable readings")]
    NoClassifiableMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeMode {
    /// Content-bank text when a bank exists for the locale, basic text otherwise.
    Rich,
    Basic,
}

/// Raw submission stored alongside the report derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub submission: AssessmentSubmission,
    pub report: AssessmentReport,
}

/// Intermediate results of the first three pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub measurements: Measurements,
    pub classifications: Classifications,
    pub score: RiskScore,
}

/// Stateless pipeline over a shared, read-only content store.
pub struct AssessmentEngine {
    content: Arc<ContentStore>,
    default_locale: Locale,
    mode: NarrativeMode,
}

impl AssessmentEngine {
    pub fn new(content: Arc<ContentStore>) -> Self {
        Self {
            content,
            default_locale: Locale::default(),
            mode: NarrativeMode::Rich,
        }
    }

    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn with_basic_narrative(mut self) -> Self {
        self.mode = NarrativeMode::Basic;
        self
    }

    pub fn mode(&self) -> NarrativeMode {
        self.mode
    }

    /// Normalize, classify and score without generating narrative text.
    pub fn evaluate(&self, submission: &AssessmentSubmission) -> Result<Evaluation, AssessmentError> {
        let measurements = normalize(&submission.measurements);
        let classifications = classify_all(&measurements);
        let score = RiskScore::from_classifications(&classifications)
            .ok_or(AssessmentError::NoClassifiableMetrics)?;

        Ok(Evaluation {
            measurements,
            classifications,
            score,
        })
    }

    /// Full pipeline with a fresh entropy-seeded generator for this call.
    pub fn assess(
        &self,
        submission: &AssessmentSubmission,
        today: NaiveDate,
    ) -> Result<AssessmentReport, AssessmentError> {
        let mut rng = StdRng::from_entropy();
        self.assess_with_rng(submission, today, &mut rng)
    }

    pub fn assess_with_rng<R: Rng + ?Sized>(
        &self,
        submission: &AssessmentSubmission,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<AssessmentReport, AssessmentError> {
        let Evaluation {
            measurements,
            classifications,
            score,
        } = self.evaluate(submission)?;

        let locale = submission
            .locale
            .clone()
            .unwrap_or_else(|| self.default_locale.clone());
        let language = Language::for_locale(&locale);

        let bank = match self.mode {
            NarrativeMode::Rich => self.content.bank(&locale),
            NarrativeMode::Basic => None,
        };
        let narrative = narrative::select(bank.as_deref(), &classifications, language, rng);

        let report = assemble(
            ReportInput {
                person: &submission.person,
                locale: &locale,
                measurements: &measurements,
                classifications: &classifications,
                score,
                narrative,
                today,
            },
            rng,
        );

        info!(
            code = %report.code,
            score = report.risk.score,
            label = ?report.risk.label,
            classified = report.kpi.classified,
            narrative = ?report.narrative,
            "assessment report generated"
        );

        Ok(report)
    }

    pub fn record<R: Rng + ?Sized>(
        &self,
        submission: AssessmentSubmission,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<AssessmentRecord, AssessmentError> {
        let report = self.assess_with_rng(&submission, today, rng)?;
        Ok(AssessmentRecord { submission, report })
    }

    /// Recompute the report from the stored raw submission, replacing the old one wholesale.
    pub fn regenerate<R: Rng + ?Sized>(
        &self,
        record: &AssessmentRecord,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<AssessmentRecord, AssessmentError> {
        let report = self.assess_with_rng(&record.submission, today, rng)?;
        info!(
            previous = %record.report.code,
            code = %report.code,
            "assessment report regenerated"
        );
        Ok(AssessmentRecord {
            submission: record.submission.clone(),
            report,
        })
    }
}
