//! Runtime configuration for the vanity address generator.

use std::sync::Arc;

use clap::Parser;

use crate::crypto::address::{check_prefix, AddressError};
use crate::matcher::{Matcher, ValidationError, DEFAULT_PREFIX};

/// Cosmos SDK bech32 vanity address generator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Amount of matching wallets to find
    #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,

    /// Amount of CPU cores to use (default: number of CPU cores)
    #[arg(long, allow_negative_numbers = true)]
    pub cpus: Option<i64>,

    /// A string that the address must contain
    #[arg(short = 'c', long, default_value = "")]
    pub contains: String,

    /// A string that the address must start with (after the prefix)
    #[arg(short = 's', long = "startswith", default_value = "")]
    pub starts_with: String,

    /// A string that the address must end with
    #[arg(short = 'e', long = "endswith", default_value = "")]
    pub ends_with: String,

    /// Amount of letters that the address must contain
    #[arg(short = 'l', long, default_value_t = 0, allow_negative_numbers = true)]
    pub letters: i64,

    /// Amount of digits that the address must contain
    #[arg(short = 'd', long, default_value_t = 0, allow_negative_numbers = true)]
    pub digits: i64,

    /// The bech32 prefix the address should have
    #[arg(short = 'p', long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Progress report interval in seconds (0 = no progress reports)
    #[arg(short = 'r', long, default_value_t = 5)]
    pub report_interval: u64,
}

/// A validated search request.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub matcher: Arc<Matcher>,
    /// Number of wallets to find, one search after another
    pub count: usize,
    pub workers: usize,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        match self.cpus {
            Some(n) => usize::try_from(n).unwrap_or(0),
            None => num_cpus::get(),
        }
    }

    /// Builds the matcher described by the flags, lowercasing every string.
    pub fn matcher(&self) -> Matcher {
        Matcher::new(&self.prefix)
            .with_starts_with(&self.starts_with)
            .with_ends_with(&self.ends_with)
            .with_contains(&self.contains)
            .with_min_letters(self.letters)
            .with_min_digits(self.digits)
    }

    /// Validates the configuration.
    ///
    /// Every problem is reported, not only the first one.
    pub fn validate(&self) -> Result<SearchPlan, Vec<ConfigError>> {
        let mut errors = Vec::new();

        if self.count < 1 {
            errors.push(ConfigError::InvalidCount);
        }
        if self.worker_count() < 1 {
            errors.push(ConfigError::InvalidCpus);
        }

        let matcher = self.matcher();
        if let Err(e) = check_prefix(matcher.prefix()) {
            errors.push(ConfigError::InvalidPrefix(e));
        }
        errors.extend(matcher.validate().into_iter().map(ConfigError::from));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SearchPlan {
            matcher: Arc::new(matcher),
            count: usize::try_from(self.count).unwrap_or(1),
            workers: self.worker_count(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The number of wallets to generate must be 1 or more")]
    InvalidCount,

    #[error("Must use at least 1 CPU core")]
    InvalidCpus,

    #[error("The bech32 prefix is not usable: {0}")]
    InvalidPrefix(AddressError),

    #[error("{0}")]
    Matcher(#[from] ValidationError),
}
