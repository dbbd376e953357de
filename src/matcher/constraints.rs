//! Vanity constraints over the data portion of a bech32 address.

use crate::crypto::address::{DATA_LEN, SEPARATOR};
use crate::crypto::charset::{self, ALPHABET_SIZE};

/// Human-readable prefix used when none is given.
pub const DEFAULT_PREFIX: &str = "cosmos";

/// A reason a matcher can never be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("A provided matcher contains bech32 incompatible characters")]
    IncompatibleCharacters,

    #[error("A provided matcher is too long. Must be max 38 characters.")]
    TooLong,

    #[error("Can't require negative amount of characters")]
    NegativeRequirement,

    #[error("Can't require more than 38 characters")]
    OverConstrained,
}

/// A set of constraints an address must satisfy.
///
/// All string constraints are stored lowercase and apply to the data
/// portion only, i.e. after `prefix` and the `1` separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    starts_with: String,
    ends_with: String,
    contains: String,
    prefix: String,
    /// Full `prefix1` string stripped before matching
    head: String,
    min_letters: i64,
    min_digits: i64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl Matcher {
    /// Creates an unconstrained matcher for addresses under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().to_lowercase();
        let head = format!("{prefix}{SEPARATOR}");

        Self {
            starts_with: String::new(),
            ends_with: String::new(),
            contains: String::new(),
            prefix,
            head,
            min_letters: 0,
            min_digits: 0,
        }
    }

    pub fn with_starts_with(mut self, s: impl AsRef<str>) -> Self {
        self.starts_with = s.as_ref().to_lowercase();
        self
    }

    pub fn with_ends_with(mut self, s: impl AsRef<str>) -> Self {
        self.ends_with = s.as_ref().to_lowercase();
        self
    }

    pub fn with_contains(mut self, s: impl AsRef<str>) -> Self {
        self.contains = s.as_ref().to_lowercase();
        self
    }

    pub fn with_min_letters(mut self, n: i64) -> Self {
        self.min_letters = n;
        self
    }

    pub fn with_min_digits(mut self, n: i64) -> Self {
        self.min_digits = n;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn starts_with(&self) -> &str {
        &self.starts_with
    }

    pub fn ends_with(&self) -> &str {
        &self.ends_with
    }

    pub fn contains(&self) -> &str {
        &self.contains
    }

    pub fn min_letters(&self) -> i64 {
        self.min_letters
    }

    pub fn min_digits(&self) -> i64 {
        self.min_digits
    }

    fn patterns(&self) -> [&str; 3] {
        [&self.starts_with, &self.ends_with, &self.contains]
    }

    /// Returns every reason this matcher can never be satisfied.
    ///
    /// An empty list means the matcher is usable.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.patterns().iter().all(|p| charset::is_bech32_only(p)) {
            errors.push(ValidationError::IncompatibleCharacters);
        }
        if self.patterns().iter().any(|p| p.chars().count() > DATA_LEN) {
            errors.push(ValidationError::TooLong);
        }
        if self.min_letters < 0 || self.min_digits < 0 {
            errors.push(ValidationError::NegativeRequirement);
        }
        if self.min_letters.saturating_add(self.min_digits) > DATA_LEN as i64 {
            errors.push(ValidationError::OverConstrained);
        }

        errors
    }

    /// Returns true if `address` satisfies every constraint.
    #[inline]
    pub fn matches(&self, address: &str) -> bool {
        let data = address.strip_prefix(&self.head).unwrap_or(address);

        // Substring checks can fail fast; the counts always scan everything.
        if !data.starts_with(&self.starts_with)
            || !data.ends_with(&self.ends_with)
            || !data.contains(&self.contains)
        {
            return false;
        }
        if self.min_digits > 0 && (charset::count_digits(data) as i64) < self.min_digits {
            return false;
        }
        if self.min_letters > 0 && (charset::count_letters(data) as i64) < self.min_letters {
            return false;
        }
        true
    }

    /// Returns the estimated number of candidates needed for one match.
    ///
    /// Only the positional constraints are counted: every fixed character
    /// multiplies the work by 32, and a `contains` pattern may land at any
    /// of the remaining offsets.
    pub fn estimated_difficulty(&self) -> u64 {
        let fixed = self.starts_with.len() + self.ends_with.len() + self.contains.len();
        let attempts = ALPHABET_SIZE.saturating_pow(fixed as u32);

        let offsets = if self.contains.is_empty() {
            1
        } else {
            DATA_LEN.saturating_sub(self.contains.len()) as u64 + 1
        };
        (attempts / offsets).max(1)
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        match diff {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=1_000_000 => "Easy (seconds)".into(),
            1_000_001..=100_000_000 => "Medium (minutes)".into(),
            100_000_001..=10_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}
