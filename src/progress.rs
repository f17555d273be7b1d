//! Progress signaling for synchronization rounds.

/// Collaborator driving a progress affordance while a round runs.
///
/// The store calls `start` exactly once per round, followed by exactly one
/// of `finish` or `fail`. Calls are fire-and-forget; implementations must
/// not block.
pub trait Progress: Send + Sync {
    fn start(&self);
    fn finish(&self);
    fn fail(&self);
}

/// Reports progress through the tracing subscriber.
///
/// Used by the watch loop, where each round's outcome is worth a log line.
#[derive(Debug, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn start(&self) {
        tracing::debug!("synchronization started");
    }

    fn finish(&self) {
        tracing::debug!("synchronization finished");
    }

    fn fail(&self) {
        tracing::debug!("synchronization failed");
    }
}

/// Discards all signals. For one-shot commands that inspect the state
/// directly after the round.
#[derive(Debug, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn start(&self) {}
    fn finish(&self) {}
    fn fail(&self) {}
}
