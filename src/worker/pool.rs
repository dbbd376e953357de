//! Worker pool management.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::crypto::Wallet;
use crate::matcher::Matcher;

use super::cpu::{CpuWorker, SearchStats};
use super::token::{CancellationToken, MatchSlot, WaitError};

/// How often a blocked caller re-checks the parent token.
const CANCEL_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("at least one worker is required")]
    NoWorkers,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),

    #[error("search cancelled before a match was found")]
    Cancelled,
}

/// Aborts the process if a worker thread unwinds. A panic inside the
/// generator means an encoding invariant broke, which is never recoverable.
struct AbortOnPanic;

impl Drop for AbortOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            std::process::abort();
        }
    }
}

/// A pool of workers racing to find one wallet accepted by a matcher.
///
/// The pool resolves at most once. Dropping it cancels the workers without
/// waiting for them; call [`WorkerPool::join`] to wait.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    matcher: Arc<Matcher>,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    slot: MatchSlot,
    token: CancellationToken,
    stats: Arc<SearchStats>,
    start_time: Instant,
}

impl WorkerPool {
    /// Spawns `num_workers` workers searching for `matcher`.
    ///
    /// The pool's token is a child of `parent`, so cancelling `parent`
    /// stops this pool as well.
    pub fn spawn(
        matcher: Arc<Matcher>,
        num_workers: usize,
        parent: &CancellationToken,
    ) -> Result<Self, SearchError> {
        if num_workers == 0 {
            return Err(SearchError::NoWorkers);
        }

        let slot = MatchSlot::new();
        let token = parent.child_token();
        let stats = Arc::new(SearchStats::new());

        let mut handles = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let mut worker = CpuWorker::new(
                id,
                matcher.clone(),
                slot.resolver(),
                token.clone(),
                stats.clone(),
            );

            let spawned = thread::Builder::new()
                .name(format!("vanity-worker-{}", worker.id()))
                .spawn(move || {
                    let _guard = AbortOnPanic;
                    worker.run();
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    token.cancel();
                    return Err(e.into());
                }
            }
        }

        tracing::debug!(workers = num_workers, prefix = matcher.prefix(), "worker pool started");

        Ok(Self {
            num_workers,
            matcher,
            handles: Some(handles),
            slot,
            token,
            stats,
            start_time: Instant::now(),
        })
    }

    /// Waits for the first match and stops the remaining workers.
    ///
    /// Returns `None` if the pool was cancelled first.
    pub fn wait(&self) -> Option<Wallet> {
        loop {
            if let Some(wallet) = self.wait_for_result(CANCEL_POLL) {
                return Some(wallet);
            }
            if self.is_stopped() {
                return None;
            }
        }
    }

    /// Waits up to `timeout` for the match.
    ///
    /// Returns `Some(wallet)` if a match is found, `None` if the timeout
    /// expires. Receiving the match cancels the remaining workers.
    pub fn wait_for_result(&self, timeout: Duration) -> Option<Wallet> {
        match self.slot.wait_timeout(timeout) {
            Ok(wallet) => {
                self.stop();
                tracing::debug!(
                    address = wallet.address(),
                    wallets = self.total_wallets(),
                    "match received"
                );
                Some(wallet)
            }
            Err(WaitError::Timeout) | Err(WaitError::Disconnected) => None,
        }
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Waits for all workers to complete.
    pub fn join(mut self) {
        self.stop();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Returns the total wallets generated across all workers.
    pub fn total_wallets(&self) -> u64 {
        self.stats.total_wallets()
    }

    /// Returns the number of accepted candidates, including discarded ones.
    pub fn total_matches(&self) -> u64 {
        self.stats.total_matches()
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current generation rate (wallets per second).
    pub fn wallets_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_wallets() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Workers observe the token after their current cycle; no join here.
        self.stop();
    }
}

/// Searches with `num_workers` threads until a wallet satisfies `matcher`.
///
/// There is no timeout: a valid but very narrow matcher may search for
/// longer than is practical.
pub fn find_match(matcher: &Matcher, num_workers: usize) -> Result<Wallet, SearchError> {
    find_match_with_token(matcher, num_workers, &CancellationToken::new())
}

/// Like [`find_match`], but gives up once `token` is cancelled.
pub fn find_match_with_token(
    matcher: &Matcher,
    num_workers: usize,
    token: &CancellationToken,
) -> Result<Wallet, SearchError> {
    let pool = WorkerPool::spawn(Arc::new(matcher.clone()), num_workers, token)?;
    pool.wait().ok_or(SearchError::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_match_ends_with() {
        let matcher = Matcher::default().with_ends_with("zz");
        let wallet = find_match(&matcher, 5).unwrap();
        assert!(wallet.address().ends_with("zz"));
        assert!(matcher.matches(wallet.address()));
    }

    #[test]
    fn test_find_match_custom_prefix() {
        let matcher = Matcher::new("osmo").with_starts_with("q");
        let wallet = find_match(&matcher, 2).unwrap();
        assert!(wallet.address().starts_with("osmo1q"));
        assert_eq!(wallet.address().len(), 43);
    }

    #[test]
    fn test_single_resolution() {
        // Every candidate matches, so all workers race to deliver.
        let pool = WorkerPool::spawn(Arc::new(Matcher::default()), 4, &CancellationToken::new())
            .unwrap();

        let first = pool.wait().unwrap();
        assert!(pool.is_stopped());
        assert_eq!(pool.wait_for_result(Duration::from_millis(50)), None);

        assert_eq!(pool.num_workers(), 4);
        assert_eq!(pool.matcher(), &Matcher::default());
        // Losing candidates are counted even though they never surface.
        assert!(pool.total_matches() >= 1);
        let stats = pool.stats.clone();

        pool.join();
        assert!(first.address().starts_with("cosmos1"));
        // Joined workers have flushed their counters.
        assert!(stats.total_wallets() >= stats.total_matches());
    }

    #[test]
    fn test_workers_stop_after_match() {
        let pool = WorkerPool::spawn(
            Arc::new(Matcher::default().with_ends_with("q")),
            3,
            &CancellationToken::new(),
        )
        .unwrap();

        assert!(pool.wait().is_some());
        let stats = pool.stats.clone();
        pool.join();

        // Joined workers never generate again.
        let total = stats.total_wallets();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(stats.total_wallets(), total);
    }

    #[test]
    fn test_parent_cancellation() {
        let parent = CancellationToken::new();
        // 38 digits is valid but practically unreachable.
        let matcher = Matcher::default().with_min_digits(38);
        let pool = WorkerPool::spawn(Arc::new(matcher), 2, &parent).unwrap();

        parent.cancel();
        assert_eq!(pool.wait(), None);
        pool.join();
    }

    #[test]
    fn test_cancelled_find_match() {
        let token = CancellationToken::new();
        token.cancel();
        let matcher = Matcher::default().with_min_digits(38);
        let result = find_match_with_token(&matcher, 2, &token);
        assert!(matches!(result, Err(SearchError::Cancelled)));
    }

    #[test]
    fn test_no_workers() {
        let result = find_match(&Matcher::default(), 0);
        assert!(matches!(result, Err(SearchError::NoWorkers)));
    }

    #[test]
    fn test_sequential_searches_are_independent() {
        let matcher = Matcher::default().with_starts_with("a");
        let a = find_match(&matcher, 2).unwrap();
        let b = find_match(&matcher, 2).unwrap();
        assert_ne!(a.private_key(), b.private_key());
    }
}
