//! Per-user serialization of read-modify-write cycles.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async lock per user id, created on demand and pruned when idle.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl UserLocks {
    /// Create an empty lock registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other operation holds `user_id`, then hold it.
    ///
    /// Dropping the returned future before it resolves leaves no entry behind.
    pub async fn acquire(&self, user_id: &str) -> UserGuard<'_> {
        // The map shard lock must be released before awaiting.
        let lock = self.locks.entry(user_id.to_string()).or_default().clone();
        let prune = PruneOnDrop {
            locks: self,
            user_id: user_id.to_string(),
        };
        // Tuple fields drop in order: on cancellation the pending acquisition
        // releases its `Arc` before the entry is pruned.
        let mut pending = (Box::pin(lock.lock_owned()), prune);
        let guard = pending.0.as_mut().await;

        UserGuard {
            _guard: guard,
            _prune: pending.1,
        }
    }

    fn prune(&self, user_id: &str) {
        // Only the map's own reference left means nobody holds or awaits it.
        self.locks
            .remove_if(user_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Number of user locks currently tracked.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no user locks are tracked.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Removes a user's entry on drop unless another operation still needs it.
#[derive(Debug)]
struct PruneOnDrop<'a> {
    locks: &'a UserLocks,
    user_id: String,
}

impl Drop for PruneOnDrop<'_> {
    fn drop(&mut self) {
        self.locks.prune(&self.user_id);
    }
}

/// Holds a user's lock until dropped.
///
/// Fields drop in order: the lock is released before the entry is pruned.
#[derive(Debug)]
pub struct UserGuard<'a> {
    _guard: OwnedMutexGuard<()>,
    _prune: PruneOnDrop<'a>,
}
