//! Fixed lookup tables of the fiscal code format.
//!
//! All tables are built once on first use and never written afterwards, so
//! they can be read from any thread without coordination.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref MONTH_MAPPING: HashMap<char, u32> = HashMap::from([
        ('A', 1),
        ('B', 2),
        ('C', 3),
        ('D', 4),
        ('E', 5),
        ('H', 6),
        ('L', 7),
        ('M', 8),
        ('P', 9),
        ('R', 10),
        ('S', 11),
        ('T', 12),
    ]);

    // Digits 0-9 in order
    static ref OMOCODIA_DIGIT_TO_LETTER: HashMap<char, char> = "0123456789"
        .chars()
        .zip(OMOCODIA_LETTERS.chars())
        .collect();

    static ref OMOCODIA_LETTER_TO_DIGIT: HashMap<char, char> = OMOCODIA_DIGIT_TO_LETTER
        .iter()
        .map(|(digit, letter)| (*letter, *digit))
        .collect();

    static ref ODD_CHARACTERS_MAPPING: HashMap<char, u32> = HashMap::from([
        ('0', 1),
        ('1', 0),
        ('2', 5),
        ('3', 7),
        ('4', 9),
        ('5', 13),
        ('6', 15),
        ('7', 17),
        ('8', 19),
        ('9', 21),
        ('A', 1),
        ('B', 0),
        ('C', 5),
        ('D', 7),
        ('E', 9),
        ('F', 13),
        ('G', 15),
        ('H', 17),
        ('I', 19),
        ('J', 21),
        ('K', 2),
        ('L', 4),
        ('M', 18),
        ('N', 20),
        ('O', 11),
        ('P', 3),
        ('Q', 6),
        ('R', 8),
        ('S', 12),
        ('T', 14),
        ('U', 16),
        ('V', 10),
        ('W', 22),
        ('X', 25),
        ('Y', 24),
        ('Z', 23),
    ]);

    // Digits are worth their value, letters their index in the alphabet.
    static ref EVEN_CHARACTERS_MAPPING: HashMap<char, u32> = ('0'..='9')
        .zip(0..)
        .chain(('A'..='Z').zip(0..))
        .collect();
}

/// Letters standing in for the digits 0 to 9 in an omocodic code.
pub const OMOCODIA_LETTERS: &str = "LMNPQRSTUV";

/// Month number (1-12) encoded by a month letter.
pub fn month_value(letter: char) -> Option<u32> {
    MONTH_MAPPING.get(&letter).copied()
}

pub fn omocodia_letter_to_digit(letter: char) -> Option<char> {
    OMOCODIA_LETTER_TO_DIGIT.get(&letter).copied()
}

pub fn omocodia_digit_to_letter(digit: char) -> Option<char> {
    OMOCODIA_DIGIT_TO_LETTER.get(&digit).copied()
}

/// Contribution of `c` to the check character sum, depending on whether its
/// 1-based position among the first 15 characters is odd or even.
pub fn checksum_value(c: char, is_odd_position: bool) -> Option<u32> {
    if is_odd_position {
        ODD_CHARACTERS_MAPPING.get(&c).copied()
    } else {
        EVEN_CHARACTERS_MAPPING.get(&c).copied()
    }
}

/// Replaces omocodia letters with their digits. Any other character is kept as is.
pub fn deomocode(input: &str) -> String {
    input
        .chars()
        .map(|c| omocodia_letter_to_digit(c.to_ascii_uppercase()).unwrap_or(c))
        .collect()
}
