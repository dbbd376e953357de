//! CPU-based worker for vanity address generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::crypto::Wallet;
use crate::matcher::Matcher;

use super::token::{CancellationToken, Resolver};

/// Candidates generated between two updates of the shared counter.
const STATS_BATCH: u64 = 256;

/// Search statistics shared by all workers of a pool.
#[derive(Debug, Default)]
pub struct SearchStats {
    /// Total wallets generated
    pub wallets_generated: AtomicU64,
    /// Wallets accepted by the matcher
    pub matches_found: AtomicU64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total wallets generated.
    pub fn total_wallets(&self) -> u64 {
        self.wallets_generated.load(Ordering::Relaxed)
    }

    /// Returns the total matches found.
    pub fn total_matches(&self) -> u64 {
        self.matches_found.load(Ordering::Relaxed)
    }
}

/// Lifecycle of a worker. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Searching,
    Stopped(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// This worker delivered the match
    Delivered,
    /// Another worker won the race after this one had found a candidate
    Discarded,
    /// The cancellation token was observed
    Cancelled,
}

/// A CPU worker that generates wallets and tests them against the matcher.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    matcher: Arc<Matcher>,
    resolver: Resolver,
    token: CancellationToken,
    stats: Arc<SearchStats>,
    state: WorkerState,
    /// Candidates not yet added to `stats`
    pending: u64,
}

impl CpuWorker {
    pub fn new(
        id: usize,
        matcher: Arc<Matcher>,
        resolver: Resolver,
        token: CancellationToken,
        stats: Arc<SearchStats>,
    ) -> Self {
        Self {
            id,
            matcher,
            resolver,
            token,
            stats,
            state: WorkerState::Searching,
            pending: 0,
        }
    }

    /// Advances the worker by one generate-and-match cycle.
    ///
    /// The cancellation token is checked before generating, so a cancelled
    /// worker finishes at most the cycle it is already in.
    pub fn step(&mut self) -> WorkerState {
        if self.state != WorkerState::Searching {
            return self.state;
        }
        if self.token.is_cancelled() {
            self.state = WorkerState::Stopped(StopReason::Cancelled);
            return self.state;
        }

        let wallet = Wallet::generate(self.matcher.prefix());
        self.pending += 1;
        if self.pending == STATS_BATCH {
            self.flush_stats();
        }

        if self.matcher.matches(wallet.address()) {
            self.stats.matches_found.fetch_add(1, Ordering::Relaxed);
            let reason = if self.resolver.resolve(wallet) {
                StopReason::Delivered
            } else {
                StopReason::Discarded
            };
            self.state = WorkerState::Stopped(reason);
        }
        self.state
    }

    /// Runs the worker until it stops and returns why it stopped.
    pub fn run(&mut self) -> StopReason {
        tracing::debug!(worker = self.id, "worker started");
        let reason = loop {
            if let WorkerState::Stopped(reason) = self.step() {
                break reason;
            }
        };
        self.flush_stats();
        tracing::debug!(worker = self.id, ?reason, "worker stopped");
        reason
    }

    fn flush_stats(&mut self) {
        self.stats
            .wallets_generated
            .fetch_add(self.pending, Ordering::Relaxed);
        self.pending = 0;
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }
}
