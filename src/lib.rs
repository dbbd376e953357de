//! # cosmos_vanity
//!
//! Multi-threaded vanity address generator for Cosmos SDK (bech32) accounts.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation and bech32 address derivation
//! - `matcher`: Address constraints and their validation
//! - `worker`: Cancellation, worker threads and the search pool
//! - `config`: Command line configuration
//! - `logging`: Diagnostic output

pub mod config;
pub mod crypto;
pub mod logging;
pub mod matcher;
pub mod worker;

pub use config::{Config, ConfigError, SearchPlan};
pub use crypto::{AddressError, Wallet};
pub use matcher::{Matcher, ValidationError};
pub use worker::{find_match, CancellationToken, SearchError, WorkerPool};
