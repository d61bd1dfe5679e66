use super::domain::{AssessmentSubmission, Locale, PersonInfo};
use super::normalize::RawMeasurementSet;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::Read;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read measurement export: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: missing client name")]
    MissingName { row: usize },
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a CSV export with one submission per row. Column names match the raw
/// measurement fields plus `name`, `age`, `assessor`, `notes` and `locale`;
/// blank cells are treated as not measured.
pub fn parse_submissions<R: Read>(reader: R) -> Result<Vec<AssessmentSubmission>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut submissions = Vec::new();

    for (index, record) in csv_reader.deserialize::<HashMap<String, String>>().enumerate() {
        let row = index + 1;
        let mut cells = record?;
        cells.retain(|_, value| !value.trim().is_empty());

        let name = cells
            .remove("name")
            .ok_or(ImportError::MissingName { row })?;
        let age = cells.remove("age").and_then(|raw| raw.parse::<u8>().ok());
        let assessor = cells.remove("assessor");
        let notes = cells.remove("notes");
        let locale = cells.remove("locale").and_then(|raw| {
            let parsed = Locale::parse(&raw);
            if parsed.is_none() {
                warn!(row, value = %raw, "ignoring invalid locale in export");
            }
            parsed
        });

        let fields: Map<String, Value> = cells
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        let measurements: RawMeasurementSet = serde_json::from_value(Value::Object(fields))
            .map_err(|source| ImportError::Row { row, source })?;

        submissions.push(AssessmentSubmission {
            person: PersonInfo {
                name,
                age,
                assessor,
                notes,
            },
            locale,
            measurements,
        });
    }

    Ok(submissions)
}
