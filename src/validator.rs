use crate::checksum::{compute_check_char, CHECKED_LENGTH, FISCAL_CODE_LENGTH};
use crate::dataset::MunicipalityLookup;
use crate::diagnostic::{Diagnostic, Sex, ValidationResult};
use crate::stats::ValidatorMetrics;
use crate::tables::{deomocode, month_value};
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use std::ops::{Range, RangeInclusive};

lazy_static! {
    // surname/name, year, month, day and sex, municipality, check character
    static ref FISCAL_CODE_PATTERN: Regex = Regex::new(
        "^[A-Z]{6}[0-9LMNPQRSTUV]{2}[A-Z][0-9LMNPQRSTUV]{2}[A-Z0-9]{4}[A-Z]$"
    )
    .unwrap();
}

const MONTH_OFFSET: usize = 8;
const DAY_RANGE: Range<usize> = 9..11;
const MUNICIPALITY_RANGE: Range<usize> = 11..15;
const FOREIGN_COUNTRY_PREFIX: char = 'Z';

const MALE_DAYS: RangeInclusive<i32> = 1..=31;
const FEMALE_DAYS: RangeInclusive<i32> = 41..=71;
const FEMALE_DAY_OFFSET: i32 = 40;

/// Uppercases and trims raw user input before validation.
pub fn normalize_input(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Validates a normalized fiscal code against the municipality table.
///
/// Only a length other than 16 stops the validation early. Every other check
/// always runs, so the result lists all the problems of the code at once.
pub fn validate<D>(code: &str, municipalities: &D) -> ValidationResult
where
    D: MunicipalityLookup + ?Sized,
{
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != FISCAL_CODE_LENGTH {
        return ValidationResult {
            valid: false,
            diagnostics: vec![Diagnostic::InvalidLength {
                length: chars.len(),
            }],
        };
    }

    let diagnostics = vec![
        check_format(code),
        check_month(chars[MONTH_OFFSET]),
        check_day(&chars[DAY_RANGE]),
        check_municipality(&chars[MUNICIPALITY_RANGE], municipalities),
        check_checksum(&chars),
    ];

    ValidationResult {
        valid: diagnostics.iter().all(|diagnostic| !diagnostic.is_failure()),
        diagnostics,
    }
}

fn check_format(code: &str) -> Diagnostic {
    if FISCAL_CODE_PATTERN.is_match(code) {
        Diagnostic::FormatValid
    } else {
        Diagnostic::FormatInvalid
    }
}

fn check_month(letter: char) -> Diagnostic {
    match month_value(letter) {
        Some(month) => Diagnostic::MonthValid { letter, month },
        None => Diagnostic::MonthInvalid { letter },
    }
}

fn check_day(field: &[char]) -> Diagnostic {
    let normalized = deomocode(&field.iter().collect::<String>());

    match normalized.parse::<i32>() {
        Err(_) => Diagnostic::DayNotNumeric { normalized },
        Ok(value) if MALE_DAYS.contains(&value) => Diagnostic::DayValid {
            sex: Sex::Male,
            day: value as u32,
        },
        Ok(value) if FEMALE_DAYS.contains(&value) => Diagnostic::DayValid {
            sex: Sex::Female,
            day: (value - FEMALE_DAY_OFFSET) as u32,
        },
        Ok(value) => Diagnostic::DayOutOfRange { value },
    }
}

fn check_municipality<D>(field: &[char], municipalities: &D) -> Diagnostic
where
    D: MunicipalityLookup + ?Sized,
{
    let raw: String = field.iter().collect();
    let first = field[0];

    if first == FOREIGN_COUNTRY_PREFIX {
        return Diagnostic::MunicipalityForeign { raw };
    }

    // Only the three trailing characters may carry omocodia letters.
    let normalized = format!("{first}{}", deomocode(&raw[first.len_utf8()..])).to_uppercase();

    match municipalities.place_name(&normalized) {
        Some(name) => Diagnostic::MunicipalityFound {
            raw,
            name: name.to_string(),
            normalized,
        },
        None => Diagnostic::MunicipalityNotFound { raw, normalized },
    }
}

fn check_checksum(chars: &[char]) -> Diagnostic {
    let found = chars[CHECKED_LENGTH];
    let checked: String = chars[..CHECKED_LENGTH].iter().collect();

    match compute_check_char(&checked) {
        Some(expected) if expected == found => Diagnostic::ChecksumValid { found },
        Some(expected) => Diagnostic::ChecksumMismatch { expected, found },
        None => Diagnostic::ChecksumUnresolvable { found },
    }
}

/// Validator bound to a municipality table, reporting metrics for every code it checks.
///
/// The table is only ever read, so a single validator can serve concurrent callers.
pub struct FiscalCodeValidator<D> {
    municipalities: D,
    metrics: ValidatorMetrics,
}

impl<D: MunicipalityLookup> FiscalCodeValidator<D> {
    pub fn new(municipalities: D) -> Self {
        Self {
            municipalities,
            metrics: ValidatorMetrics::new(),
        }
    }

    pub fn municipalities(&self) -> &D {
        &self.municipalities
    }

    pub fn validate(&self, code: &str) -> ValidationResult {
        let result = validate(code, &self.municipalities);
        self.metrics.record(&result);

        tracing::debug!(
            valid = result.valid,
            failures = result.failures().count(),
            "validated fiscal code"
        );
        result
    }

    /// Validates every code in parallel. Results keep the order of `codes`.
    pub fn validate_batch<S>(&self, codes: &[S]) -> Vec<ValidationResult>
    where
        S: AsRef<str> + Sync,
        D: Sync,
    {
        codes
            .par_iter()
            .map(|code| self.validate(code.as_ref()))
            .collect()
    }
}
