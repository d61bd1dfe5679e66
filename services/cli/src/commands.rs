use crate::infra::{
    build_engine, parse_date, parse_locale, read_json, rng_from_seed, today_or_now,
};
use chrono::NaiveDate;
use clap::Args;
use medfit::assessment::import::parse_submissions;
use medfit::assessment::{
    ActivityLevel, AssessmentRecord, AssessmentReport, AssessmentSubmission, Locale, RiskLabel,
};
use medfit::config::AppConfig;
use medfit::error::AppError;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding one assessment submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override the submission locale (two-letter tag)
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed for narrative selection and the report code
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Skip the content bank and use the fixed narrative
    #[arg(long)]
    pub(crate) basic: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one submission per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed for narrative selection and report codes
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct RegenerateArgs {
    /// JSON file holding a stored assessment record
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed for narrative selection and the report code
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

/// One line of `batch` output.
#[derive(Debug, Serialize)]
struct BatchSummary<'a> {
    row: usize,
    name: &'a str,
    code: &'a str,
    score: u8,
    label: RiskLabel,
    activity_level: ActivityLevel,
}

impl<'a> BatchSummary<'a> {
    fn new(row: usize, report: &'a AssessmentReport) -> Self {
        Self {
            row,
            name: &report.person.name,
            code: &report.code,
            score: report.risk.score,
            label: report.risk.label,
            activity_level: report.kpi.activity_level,
        }
    }
}

pub(crate) fn run_assess(config: &AppConfig, args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        locale,
        today,
        seed,
        basic,
    } = args;

    let mut submission: AssessmentSubmission = read_json(&input)?;
    if locale.is_some() {
        submission.locale = locale;
    }

    let engine = build_engine(config, basic);
    let mut rng = rng_from_seed(seed);
    let report = engine.assess_with_rng(&submission, today_or_now(today), &mut rng)?;

    print_json(&report)
}

pub(crate) fn run_batch(config: &AppConfig, args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { csv, today, seed } = args;

    let file = File::open(&csv)?;
    let submissions = parse_submissions(BufReader::new(file))?;
    let engine = build_engine(config, false);
    let mut rng = rng_from_seed(seed);
    let today = today_or_now(today);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut scored = 0;
    for (index, submission) in submissions.iter().enumerate() {
        let row = index + 1;
        match engine.assess_with_rng(submission, today, &mut rng) {
            Ok(report) => {
                serde_json::to_writer(&mut out, &BatchSummary::new(row, &report))?;
                writeln!(out)?;
                scored += 1;
            }
            Err(err) => warn!(row, name = %submission.person.name, error = %err, "row skipped"),
        }
    }

    info!(
        path = %csv.display(),
        rows = submissions.len(),
        scored,
        "batch finished"
    );
    Ok(())
}

pub(crate) fn run_regenerate(config: &AppConfig, args: RegenerateArgs) -> Result<(), AppError> {
    let RegenerateArgs {
        record,
        today,
        seed,
    } = args;

    let stored: AssessmentRecord = read_json(&record)?;
    let engine = build_engine(config, false);
    let mut rng = rng_from_seed(seed);
    let regenerated = engine.regenerate(&stored, today_or_now(today), &mut rng)?;

    print_json(&regenerated)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
