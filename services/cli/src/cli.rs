use crate::commands::{
    run_assess, run_batch, run_regenerate, AssessArgs, BatchArgs, RegenerateArgs,
};
use clap::{Parser, Subcommand};
use medfit::config::AppConfig;
use medfit::error::AppError;
use medfit::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "medfit",
    about = "Score fitness assessments and render client reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one submission and print the report as JSON
    Assess(AssessArgs),
    /// Score every row of a CSV export and print one summary line per row
    Batch(BatchArgs),
    /// Recompute the report of a stored assessment record
    Regenerate(RegenerateArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Assess(args) => run_assess(&config, args),
        Command::Batch(args) => run_batch(&config, args),
        Command::Regenerate(args) => run_regenerate(&config, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_assess_flags() {
        let cli = Cli::try_parse_from([
            "medfit",
            "assess",
            "--input",
            "client.json",
            "--locale",
            "de",
            "--today",
            "2025-05-02",
            "--seed",
            "7",
            "--basic",
        ])
        .expect("arguments parse");

        match cli.command {
            Command::Assess(args) => {
                assert_eq!(args.input, PathBuf::from("client.json"));
                assert_eq!(args.locale.as_ref().map(|locale| locale.as_str()), Some("de"));
                assert_eq!(args.seed, Some(7));
                assert!(args.basic);
                assert_eq!(args.today, chrono::NaiveDate::from_ymd_opt(2025, 5, 2));
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates_and_locales() {
        let bad_date = ["medfit", "batch", "--csv", "x.csv", "--today", "02.05.2025"];
        assert!(Cli::try_parse_from(bad_date).is_err());

        let bad_locale = ["medfit", "assess", "--input", "x.json", "--locale", "deu"];
        assert!(Cli::try_parse_from(bad_locale).is_err());
    }
}
