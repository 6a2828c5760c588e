//! Cooperative cancellation for long-running solves.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

/// A cancellation signal shared between a solve and its controller.
///
/// The token combines an externally settable flag with an optional deadline.
/// The solver polls [`CancelToken::is_cancelled`] at the top of every search
/// step and unwinds with [`Outcome::Cancelled`] once either trips; no
/// partial board escapes a cancelled solve.
///
/// Clones share the underlying flag, so a token handed to a solver can be
/// cancelled from another thread.
///
/// [`Outcome::Cancelled`]: crate::Outcome::Cancelled
///
/// # Examples
///
/// ```
/// use gridoku_solver::CancelToken;
///
/// let token = CancelToken::new();
/// let shared = token.clone();
/// assert!(!shared.is_cancelled());
///
/// token.cancel();
/// assert!(shared.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Creates a token that never trips until [`CancelToken::cancel`] is
    /// called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that trips at the given instant.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Creates a token that trips after the given duration from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Trips the token. All clones observe the cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once the flag is set or the deadline has passed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
