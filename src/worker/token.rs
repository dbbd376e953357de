//! Coordination primitives shared between the pool and its workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::crypto::Wallet;

#[derive(Debug, Default)]
struct TokenInner {
    cancelled: AtomicBool,
    parent: Option<CancellationToken>,
}

/// A cloneable stop signal that workers poll between candidates.
///
/// A child token reports cancellation when it or any of its ancestors
/// has been cancelled; cancelling a child leaves the parent untouched.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<TokenInner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that is also cancelled when `self` is.
    pub fn child_token(&self) -> Self {
        Self {
            inner: Arc::new(TokenInner {
                cancelled: AtomicBool::new(false),
                parent: Some(self.clone()),
            }),
        }
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
            || self
                .inner
                .parent
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Why waiting on a [`MatchSlot`] returned without a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WaitError {
    #[error("no match within the timeout")]
    Timeout,
    #[error("every resolver is gone")]
    Disconnected,
}

/// Sending half of a [`MatchSlot`], held by every worker.
#[derive(Debug, Clone)]
pub struct Resolver {
    resolved: Arc<AtomicBool>,
    tx: Sender<Wallet>,
}

impl Resolver {
    /// Attempts to resolve the slot with `wallet` without blocking.
    ///
    /// Only the first call across all resolvers succeeds. Later calls, and
    /// calls made after the slot was dropped, discard the wallet and
    /// return false.
    pub fn resolve(&self, wallet: Wallet) -> bool {
        if self
            .resolved
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        self.tx.try_send(wallet).is_ok()
    }
}

/// A value that can be resolved exactly once by any of its resolvers.
#[derive(Debug)]
pub struct MatchSlot {
    resolved: Arc<AtomicBool>,
    tx: Sender<Wallet>,
    rx: Receiver<Wallet>,
}

impl Default for MatchSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSlot {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self {
            resolved: Arc::new(AtomicBool::new(false)),
            tx,
            rx,
        }
    }

    pub fn resolver(&self) -> Resolver {
        Resolver {
            resolved: self.resolved.clone(),
            tx: self.tx.clone(),
        }
    }

    /// Blocks until the slot is resolved.
    pub fn wait(&self) -> Result<Wallet, WaitError> {
        self.rx.recv().map_err(|_| WaitError::Disconnected)
    }

    /// Blocks until the slot is resolved or `timeout` elapses.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Wallet, WaitError> {
        self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => WaitError::Timeout,
            RecvTimeoutError::Disconnected => WaitError::Disconnected,
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_cancel() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_child_token() {
        let root = CancellationToken::new();
        let child = root.child_token();
        let grandchild = child.child_token();

        child.cancel();
        assert!(!root.is_cancelled());
        assert!(grandchild.is_cancelled());

        let other = root.child_token();
        assert!(!other.is_cancelled());
        root.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_slot_resolves_once() {
        let slot = MatchSlot::new();
        let a = slot.resolver();
        let b = slot.resolver();

        let first = Wallet::generate("cosmos");
        let second = Wallet::generate("cosmos");

        assert!(a.resolve(first.clone()));
        assert!(!b.resolve(second.clone()));
        assert!(!a.resolve(second));
        assert!(slot.is_resolved());
        assert_eq!(slot.wait(), Ok(first));
        assert_eq!(
            slot.wait_timeout(Duration::from_millis(10)),
            Err(WaitError::Timeout)
        );
    }

    #[test]
    fn test_resolve_after_drop() {
        let slot = MatchSlot::new();
        let resolver = slot.resolver();
        drop(slot);
        assert!(!resolver.resolve(Wallet::generate("cosmos")));
    }

    #[test]
    fn test_wait_timeout() {
        let slot = MatchSlot::new();
        assert_eq!(
            slot.wait_timeout(Duration::from_millis(10)),
            Err(WaitError::Timeout)
        );
        assert!(!slot.is_resolved());
    }
}
