// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod checksum;
mod config;
mod dataset;
mod diagnostic;
mod stats;
mod tables;
mod validator;

pub use checksum::{
    compute_check_char, FiscalCodeChecksum, Validator, CHECKED_LENGTH, FISCAL_CODE_LENGTH,
};
pub use config::{DatasetConfig, DatasetFormat, DEFAULT_DATASET_PATH};
pub use dataset::{DatasetError, MunicipalityDataset, MunicipalityLookup};
pub use diagnostic::{CheckKind, Diagnostic, Sex, ValidationResult};
pub use stats::{ValidatorMetrics, CHECK_FAILURES, VALIDATIONS};
pub use tables::{
    checksum_value, deomocode, month_value, omocodia_digit_to_letter, omocodia_letter_to_digit,
    OMOCODIA_LETTERS,
};
pub use validator::{normalize_input, validate, FiscalCodeValidator};
