use crate::tables::checksum_value;

/// Number of characters covered by the check character.
pub const CHECKED_LENGTH: usize = 15;

pub const FISCAL_CODE_LENGTH: usize = CHECKED_LENGTH + 1;

pub trait Validator: Send + Sync {
    fn is_valid_match(&self, regex_match: &str) -> bool;
}

/// Computes the expected check character over the first 15 characters of `code`.
///
/// Returns `None` when one of those characters has no value in the odd/even
/// tables, in which case no check character can match.
pub fn compute_check_char(code: &str) -> Option<char> {
    let mut checksum_value_sum = 0;

    for (idx, c) in code.chars().take(CHECKED_LENGTH).enumerate() {
        let position = idx + 1;
        checksum_value_sum += checksum_value(c.to_ascii_uppercase(), position % 2 == 1)?;
    }

    Some((b'A' + (checksum_value_sum % 26) as u8) as char)
}

/// Checksum-only test for fiscal codes found in free text.
///
/// Separators between the blocks (spaces, dashes, slashes...) are ignored.
pub struct FiscalCodeChecksum;

impl Validator for FiscalCodeChecksum {
    fn is_valid_match(&self, regex_match: &str) -> bool {
        let valid_chars: Vec<char> = regex_match
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if valid_chars.len() != FISCAL_CODE_LENGTH {
            return false;
        }

        let code: String = valid_chars[..CHECKED_LENGTH].iter().collect();
        compute_check_char(&code) == Some(valid_chars[CHECKED_LENGTH])
    }
}
