//! Cancellation and deadlines for render calls.
//!
//! Rendering is the only operation that reaches an external process, so it is
//! the only one that takes a [`RenderContext`]. Clones of a context share one
//! cancellation flag: cancelling any clone cancels them all.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::render::RenderError;

/// Caller-controlled cancellation and deadline for a render call.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use archmap::RenderContext;
///
/// let ctx = RenderContext::background().with_timeout(Duration::from_secs(30));
/// assert!(ctx.check().is_ok());
///
/// let handle = ctx.clone();
/// handle.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl RenderContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Sets a deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline. An earlier deadline already set wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels this context and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails if the context was cancelled or its deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Cancelled`] or [`RenderError::DeadlineExceeded`].
    pub fn check(&self) -> Result<(), RenderError> {
        if self.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(RenderError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_never_expires() {
        let ctx = RenderContext::background();
        assert!(ctx.deadline().is_none());
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let ctx = RenderContext::background();
        let clone = ctx.clone();

        clone.cancel();

        assert!(ctx.is_cancelled());
        assert!(matches!(ctx.check(), Err(RenderError::Cancelled)));
    }

    #[test]
    fn test_expired_deadline() {
        let ctx = RenderContext::background().with_deadline(Instant::now());
        assert!(matches!(ctx.check(), Err(RenderError::DeadlineExceeded)));
    }

    #[test]
    fn test_earlier_deadline_wins() {
        let now = Instant::now();
        let ctx = RenderContext::background()
            .with_deadline(now + Duration::from_secs(5))
            .with_deadline(now + Duration::from_secs(60));

        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_cancellation_takes_precedence_over_deadline() {
        let ctx = RenderContext::background().with_deadline(Instant::now());
        ctx.cancel();
        assert!(matches!(ctx.check(), Err(RenderError::Cancelled)));
    }
}
