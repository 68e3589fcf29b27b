//! Scheduled-search handle.
//!
//! Rapid search requests coalesce: scheduling replaces whatever is pending
//! and pushes the deadline out, so only the latest query is evaluated once
//! input has been quiet for the window. Time is passed in explicitly, which
//! keeps the handle free of timers; the event loop sleeps until
//! [`SearchDebounce::deadline`].
use std::time::Duration;

use tokio::time::Instant;

/// Default quiet window before a typed search is evaluated.
pub const DEFAULT_QUIET_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct SearchDebounce {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Schedule `query`, replacing any pending one.
    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now + self.quiet));
    }

    /// Drop the pending query, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending query becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Take the pending query if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if *at <= now => self.pending.take().map(|(q, _)| q),
            _ => None,
        }
    }

    /// Take the pending query regardless of its deadline.
    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take().map(|(q, _)| q)
    }
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_QUIET_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_not_due_before_window() {
        let mut d = SearchDebounce::default();
        d.schedule("lisp", Instant::now());

        tokio::time::advance(Duration::from_millis(299)).await;
        assert_eq!(d.take_due(Instant::now()), None);
        assert!(d.is_pending());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(d.take_due(Instant::now()).as_deref(), Some("lisp"));
        assert!(!d.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_coalesces_to_latest() {
        let mut d = SearchDebounce::default();
        for (i, q) in ["l", "li", "lis", "lisp"].into_iter().enumerate() {
            if i > 0 {
                tokio::time::advance(Duration::from_millis(100)).await;
            }
            d.schedule(q, Instant::now());
            assert_eq!(d.take_due(Instant::now()), None);
        }

        tokio::time::advance(Duration::from_millis(300)).await;
        assert_eq!(d.take_due(Instant::now()).as_deref(), Some("lisp"));
        assert_eq!(d.take_due(Instant::now()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_moves_with_each_schedule() {
        let mut d = SearchDebounce::new(Duration::from_millis(50));
        let start = Instant::now();
        d.schedule("a", start);
        assert_eq!(d.deadline(), Some(start + Duration::from_millis(50)));

        tokio::time::advance(Duration::from_millis(20)).await;
        let later = Instant::now();
        d.schedule("ab", later);
        assert_eq!(d.deadline(), Some(later + Duration::from_millis(50)));
    }

    #[test]
    fn test_cancel_and_take_pending() {
        let mut d = SearchDebounce::default();
        let now = Instant::now();
        d.schedule("essay", now);
        assert_eq!(d.take_pending().as_deref(), Some("essay"));
        assert_eq!(d.deadline(), None);

        d.schedule("again", now);
        d.cancel();
        assert_eq!(d.take_pending(), None);
    }
}
