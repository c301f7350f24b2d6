//! Millisecond message id generation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Distance between a triggering message id and its bot reply id.
pub const BOT_REPLY_OFFSET_MS: u64 = 1000;

type TimeSource = Box<dyn Fn() -> u64 + Send + Sync>;

/// Hands out strictly increasing millisecond timestamps.
///
/// Each tick is `max(now_ms, last + 1)`, so two calls never return the same
/// value even within one millisecond or across a backwards clock step.
pub struct IdClock {
    last: AtomicU64,
    source: TimeSource,
}

impl IdClock {
    /// A clock reading the system wall clock.
    pub fn system() -> Self {
        Self::with_source(now_millis)
    }

    /// A clock reading milliseconds from a custom source.
    pub fn with_source<F>(source: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        Self {
            last: AtomicU64::new(0),
            source: Box::new(source),
        }
    }

    /// Next id, strictly greater than every id returned before.
    pub fn tick(&self) -> u64 {
        let now = (self.source)();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let next = now.max(last + 1);
            match self
                .last
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}

impl Default for IdClock {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for IdClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdClock")
            .field("last", &self.last.load(Ordering::SeqCst))
            .finish()
    }
}

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
