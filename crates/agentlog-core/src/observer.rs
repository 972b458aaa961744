//! Observers notified before every animated log call.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Receives the text of every animated log call.
///
/// Errors and panics from one observer are contained: the remaining
/// observers still run and the log write still happens.
pub trait ChatObserver: Send + Sync {
    fn report(&self, text: &str) -> anyhow::Result<()>;
}

impl<F> ChatObserver for F
where
    F: Fn(&str) -> anyhow::Result<()> + Send + Sync,
{
    fn report(&self, text: &str) -> anyhow::Result<()> {
        self(text)
    }
}

/// Call `report` on every observer in order, isolating failures.
///
/// Returns how many observers failed.
pub(crate) fn notify_all(observers: &[Arc<dyn ChatObserver>], text: &str) -> usize {
    let mut failed = 0;
    for (index, observer) in observers.iter().enumerate() {
        match panic::catch_unwind(AssertUnwindSafe(|| observer.report(text))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                failed += 1;
                tracing::warn!(observer = index, error = %e, "observer report failed");
            }
            Err(_) => {
                failed += 1;
                tracing::warn!(observer = index, "observer panicked during report");
            }
        }
    }
    failed
}
