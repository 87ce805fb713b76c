//! `cf-validate`: checks Italian fiscal codes against a municipality dataset.

use anyhow::Context;
use clap::Parser;
use codice_fiscale::{
    normalize_input, DatasetConfig, DatasetFormat, FiscalCodeValidator, MunicipalityDataset,
    ValidationResult, DEFAULT_DATASET_PATH,
};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Validate Italian fiscal codes (codice fiscale).
///
/// Prompts for a code on standard input when none is given.
#[derive(Parser, Debug)]
#[command(name = "cf-validate", version, about)]
struct Cli {
    /// Fiscal codes to validate.
    codes: Vec<String>,

    /// Municipality dataset with `cod_fisco` / `comune` records.
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// How the dataset file is read.
    #[arg(long, default_value_t = DatasetFormat::Scan)]
    format: DatasetFormat,

    /// Print one JSON report per code.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    code: &'a str,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DatasetConfig::new(&cli.dataset).format(cli.format);
    let dataset =
        MunicipalityDataset::load(&config).context("cannot start without municipality data")?;
    let validator = FiscalCodeValidator::new(dataset);

    let raw_codes = if cli.codes.is_empty() {
        vec![prompt_code()?]
    } else {
        cli.codes
    };
    let codes: Vec<String> = raw_codes.iter().map(|raw| normalize_input(raw)).collect();
    let results = validator.validate_batch(&codes);

    let mut stdout = io::stdout().lock();
    for (code, result) in codes.iter().zip(&results) {
        write_report(&mut stdout, code, result, cli.json)?;
    }

    Ok(exit_code(&results))
}

/// Writes the report of one code, either as text lines or as a single JSON line.
fn write_report(
    out: &mut impl Write,
    code: &str,
    result: &ValidationResult,
    json: bool,
) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &Report { code, result })?;
        return writeln!(out);
    }

    writeln!(out, "Code: {code}")?;
    writeln!(out, "Valid: {}", result.valid)?;
    for message in result.messages() {
        writeln!(out, "- {message}")?;
    }
    Ok(())
}

fn all_valid(results: &[ValidationResult]) -> bool {
    results.iter().all(|result| result.valid)
}

fn exit_code(results: &[ValidationResult]) -> ExitCode {
    if all_valid(results) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn prompt_code() -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter fiscal code: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read fiscal code from stdin")?;
    Ok(line)
}
