//! Error types for the reconcile crate.

/// Errors that can occur when committing to or deleting from the local slot.
///
/// Comparison itself never fails.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// No local store is configured, so the local copy cannot change.
    #[error("local store is not available")]
    LocalStoreUnavailable,

    /// Commit was requested without a generated asset.
    #[error("no generated asset to commit")]
    NothingToCommit,
}

/// Convenience alias for reconcile results.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
