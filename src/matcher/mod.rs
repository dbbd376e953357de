//! Vanity constraints for bech32 account addresses.
//!
//! Supports:
//! - StartsWith / EndsWith / Contains over the data portion
//! - Minimum digit and letter counts
//! - A configurable human-readable prefix

mod constraints;

pub use constraints::{Matcher, ValidationError, DEFAULT_PREFIX};
