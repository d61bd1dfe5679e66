use chrono::{Local, NaiveDate};
use medfit::assessment::{AssessmentEngine, ContentStore, Locale};
use medfit::config::AppConfig;
use medfit::error::AppError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("'{raw}' is not a two-letter locale"))
}

pub(crate) fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

/// Seeded generator when a seed is given, so output can be reproduced.
pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub(crate) fn build_engine(config: &AppConfig, basic: bool) -> AssessmentEngine {
    let store = Arc::new(ContentStore::from_config(&config.content));
    let engine =
        AssessmentEngine::new(store).with_default_locale(config.content.default_locale.clone());
    let engine = if basic {
        engine.with_basic_narrative()
    } else {
        engine
    };
    debug!(
        mode = ?engine.mode(),
        locale = %config.content.default_locale,
        "assessment engine ready"
    );
    engine
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
