//! The bech32 data alphabet, split into digit and letter classes.

/// Digits that appear in bech32 data (`1` is reserved as the separator).
pub const DIGITS: &str = "023456789";

/// Letters that appear in bech32 data (`b`, `i` and `o` are excluded).
pub const LETTERS: &str = "acdefghjklmnpqrstuvwxyz";

/// Number of symbols in the bech32 alphabet.
pub const ALPHABET_SIZE: u64 = 32;

/// Returns true if `c` is a bech32 digit.
#[inline]
pub fn is_digit(c: char) -> bool {
    DIGITS.contains(c)
}

/// Returns true if `c` is a bech32 letter. Bech32 is case-insensitive, so
/// uppercase letters count too.
#[inline]
pub fn is_letter(c: char) -> bool {
    LETTERS.contains(c.to_ascii_lowercase())
}

/// Returns true if `c` belongs to the bech32 alphabet.
#[inline]
pub fn is_bech32(c: char) -> bool {
    is_digit(c) || is_letter(c)
}

/// Returns true if every character of `s` belongs to the bech32 alphabet.
pub fn is_bech32_only(s: &str) -> bool {
    s.chars().all(is_bech32)
}

/// Counts the bech32 digits in `s`.
pub fn count_digits(s: &str) -> usize {
    s.chars().filter(|&c| is_digit(c)).count()
}

/// Counts the bech32 letters in `s`.
pub fn count_letters(s: &str) -> usize {
    s.chars().filter(|&c| is_letter(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_cover_alphabet() {
        assert_eq!((DIGITS.len() + LETTERS.len()) as u64, ALPHABET_SIZE);
        assert!(DIGITS.chars().all(|c| !LETTERS.contains(c)));
    }

    #[test]
    fn test_excluded_characters() {
        for c in ['1', 'b', 'i', 'o', 'B', 'I', 'O', '-', ' '] {
            assert!(!is_bech32(c), "{c:?} should not be bech32");
        }
    }

    #[test]
    fn test_uppercase_letters() {
        assert!(is_letter('Q'));
        assert!(is_bech32_only("QPZRY9X8"));
    }

    #[test]
    fn test_counts() {
        assert_eq!(count_digits("a0c2b1"), 2);
        assert_eq!(count_letters("a0c2b1"), 2);
        assert_eq!(count_digits(""), 0);
    }
}
