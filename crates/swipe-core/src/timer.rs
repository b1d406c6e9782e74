use std::time::Duration;
use web_time::Instant;

/// A deferred one-shot task, polled from the owner's event loop.
///
/// The owner calls [`OneShot::poll`] each tick; the task fires at most once,
/// and never after [`OneShot::cancel`].
pub struct OneShot<T> {
    due: Instant,
    task: Option<T>,
}

impl<T> OneShot<T> {
    pub fn after(now: Instant, delay: Duration, task: T) -> Self {
        Self {
            due: now + delay,
            task: Some(task),
        }
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Hands the task out once `now` has reached the deadline.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if now >= self.due { self.task.take() } else { None }
    }

    /// Drops the task without running it. Safe to call multiple times.
    pub fn cancel(&mut self) -> Option<T> {
        self.task.take()
    }
}

impl<T> std::fmt::Debug for OneShot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneShot")
            .field("due", &self.due)
            .field("pending", &self.is_pending())
            .finish()
    }
}
