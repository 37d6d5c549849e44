//! Events sent from the backend worker to the UI thread.

use client_core::RemoteOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Result of one remote call; failures arrive as `RemoteOutcome::Failed`.
    Remote(RemoteOutcome),
    /// The worker could not start and will not process commands.
    WorkerFailed(String),
}
