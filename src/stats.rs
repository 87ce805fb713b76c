use crate::diagnostic::{CheckKind, ValidationResult};
use metrics::{counter, Counter};
use std::collections::HashMap;
use strum::IntoEnumIterator;

const OUTCOME: &str = "outcome";
const CHECK: &str = "check";

pub const VALIDATIONS: &str = "fiscal_code.validations";
pub const CHECK_FAILURES: &str = "fiscal_code.check_failures";

pub struct ValidatorMetrics {
    pub valid_codes: Counter,
    pub invalid_codes: Counter,
    check_failures: HashMap<CheckKind, Counter>,
}

impl ValidatorMetrics {
    pub fn new() -> Self {
        ValidatorMetrics {
            valid_codes: counter!(VALIDATIONS, OUTCOME => "valid"),
            invalid_codes: counter!(VALIDATIONS, OUTCOME => "invalid"),
            check_failures: CheckKind::iter()
                .map(|check| {
                    let label: &'static str = check.into();
                    (check, counter!(CHECK_FAILURES, CHECK => label))
                })
                .collect(),
        }
    }

    pub fn record(&self, result: &ValidationResult) {
        if result.valid {
            self.valid_codes.increment(1);
        } else {
            self.invalid_codes.increment(1);
        }

        for failure in result.failures() {
            if let Some(counter) = self.check_failures.get(&failure.check()) {
                counter.increment(1);
            }
        }
    }
}

impl Default for ValidatorMetrics {
    fn default() -> Self {
        ValidatorMetrics::new()
    }
}
