//! Worker pool for parallel vanity address search.
//!
//! This module provides:
//! - A cancellation token polled by every worker
//! - A match slot that accepts exactly one wallet
//! - Multi-threaded CPU workers and the pool that runs them

mod cpu;
mod pool;
mod token;

pub use cpu::{CpuWorker, SearchStats, StopReason, WorkerState};
pub use pool::{find_match, find_match_with_token, SearchError, WorkerPool};
pub use token::{CancellationToken, MatchSlot, Resolver, WaitError};
