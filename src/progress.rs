//! Progress sink — a one-way, fire-and-forget status channel.
//!
//! The search reports a human-readable string at the start of each level, per
//! side. A sink must never block and never fail the search; implementations
//! swallow their own delivery errors.

/// One-way notification channel for search status strings.
pub trait ProgressSink: Send + Sync {
    fn update(&self, message: &str);
}

/// The do-nothing sink.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _message: &str) {}
}

/// Adapter turning any `Fn(&str)` closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> ProgressSink for FnSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn update(&self, message: &str) {
        (self.0)(message);
    }
}
