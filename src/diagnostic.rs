use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};
use std::fmt::{self, Display, Formatter};
use strum::{EnumIter, IntoStaticStr};

/// The individual checks run against a fiscal code, in reporting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CheckKind {
    Length,
    Format,
    Month,
    Day,
    Municipality,
    Checksum,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Display for Sex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// Outcome of a single check. Passing checks are reported too.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    InvalidLength { length: usize },
    FormatValid,
    FormatInvalid,
    MonthValid { letter: char, month: u32 },
    MonthInvalid { letter: char },
    DayValid { sex: Sex, day: u32 },
    /// The day field is still not a number once omocodia letters are replaced.
    DayNotNumeric { normalized: String },
    DayOutOfRange { value: i32 },
    /// Codes starting with `Z` denote a foreign country.
    MunicipalityForeign { raw: String },
    MunicipalityFound {
        raw: String,
        normalized: String,
        name: String,
    },
    MunicipalityNotFound { raw: String, normalized: String },
    ChecksumValid { found: char },
    ChecksumMismatch { expected: char, found: char },
    /// Some of the first 15 characters have no checksum value.
    ChecksumUnresolvable { found: char },
}

impl Diagnostic {
    pub fn check(&self) -> CheckKind {
        match self {
            Diagnostic::InvalidLength { .. } => CheckKind::Length,
            Diagnostic::FormatValid | Diagnostic::FormatInvalid => CheckKind::Format,
            Diagnostic::MonthValid { .. } | Diagnostic::MonthInvalid { .. } => CheckKind::Month,
            Diagnostic::DayValid { .. }
            | Diagnostic::DayNotNumeric { .. }
            | Diagnostic::DayOutOfRange { .. } => CheckKind::Day,
            Diagnostic::MunicipalityForeign { .. }
            | Diagnostic::MunicipalityFound { .. }
            | Diagnostic::MunicipalityNotFound { .. } => CheckKind::Municipality,
            Diagnostic::ChecksumValid { .. }
            | Diagnostic::ChecksumMismatch { .. }
            | Diagnostic::ChecksumUnresolvable { .. } => CheckKind::Checksum,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Diagnostic::InvalidLength { .. }
                | Diagnostic::FormatInvalid
                | Diagnostic::MonthInvalid { .. }
                | Diagnostic::DayNotNumeric { .. }
                | Diagnostic::DayOutOfRange { .. }
                | Diagnostic::MunicipalityNotFound { .. }
                | Diagnostic::ChecksumMismatch { .. }
                | Diagnostic::ChecksumUnresolvable { .. }
        )
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidLength { length } => {
                write!(f, "length invalid: expected 16 characters, found {length}")
            }
            Diagnostic::FormatValid => write!(f, "format valid"),
            Diagnostic::FormatInvalid => write!(f, "format invalid (pattern mismatch)"),
            Diagnostic::MonthValid { letter, month } => {
                write!(f, "month valid: {letter} -> {month}")
            }
            Diagnostic::MonthInvalid { letter } => write!(f, "month letter invalid: {letter}"),
            Diagnostic::DayValid { sex, day } => write!(f, "day valid ({sex}): {day}"),
            Diagnostic::DayNotNumeric { normalized } => {
                write!(f, "day not numeric after omocodia normalization: {normalized}")
            }
            Diagnostic::DayOutOfRange { value } => write!(f, "day out of valid range: {value}"),
            Diagnostic::MunicipalityForeign { raw } => write!(
                f,
                "foreign code, dataset check not applicable: {raw}"
            ),
            Diagnostic::MunicipalityFound {
                raw,
                normalized,
                name,
            } => write!(
                f,
                "municipality code found in dataset: raw={raw}, normalized={normalized}, name={name}"
            ),
            Diagnostic::MunicipalityNotFound { raw, normalized } => write!(
                f,
                "municipality code not found in dataset: raw={raw}, normalized={normalized}"
            ),
            Diagnostic::ChecksumValid { found } => write!(f, "check character valid: {found}"),
            Diagnostic::ChecksumMismatch { expected, found } => write!(
                f,
                "check character mismatch: expected {expected} but found {found}"
            ),
            Diagnostic::ChecksumUnresolvable { found } => write!(
                f,
                "check character unresolvable: unsupported characters in the first 15, found {found}"
            ),
        }
    }
}

/// Verdict over a fiscal code plus one diagnostic per check performed.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    #[serde(rename = "messages")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn messages(&self) -> impl Iterator<Item = String> + '_ {
        self.diagnostics.iter().map(Diagnostic::to_string)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_failure())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Diagnostic::DayValid {
                sex: Sex::Female,
                day: 5
            }
            .to_string(),
            "day valid (female): 5"
        );
        assert_eq!(
            Diagnostic::MunicipalityForeign {
                raw: "Z404".to_string()
            }
            .to_string(),
            "foreign code, dataset check not applicable: Z404"
        );
        assert_eq!(
            Diagnostic::ChecksumMismatch {
                expected: 'Q',
                found: 'Z'
            }
            .to_string(),
            "check character mismatch: expected Q but found Z"
        );
    }

    #[test]
    fn test_check_kind_labels() {
        let label: &'static str = CheckKind::Municipality.into();
        assert_eq!(label, "municipality");
        assert_eq!(Diagnostic::FormatInvalid.check(), CheckKind::Format);
        assert_eq!(
            Diagnostic::ChecksumUnresolvable { found: 'A' }.check(),
            CheckKind::Checksum
        );
    }

    #[test]
    fn test_foreign_code_is_not_a_failure() {
        assert!(!Diagnostic::MunicipalityForeign {
            raw: "Z404".to_string()
        }
        .is_failure());
        assert!(Diagnostic::MunicipalityNotFound {
            raw: "H50M".to_string(),
            normalized: "H501".to_string()
        }
        .is_failure());
    }

    #[test]
    fn test_serialize_result() {
        let result = ValidationResult {
            valid: false,
            diagnostics: vec![
                Diagnostic::FormatValid,
                Diagnostic::MonthInvalid { letter: 'X' },
            ],
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "valid": false,
                "messages": ["format valid", "month letter invalid: X"]
            })
        );
    }
}
