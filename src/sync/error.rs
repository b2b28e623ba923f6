use thiserror::Error;

/// Infrastructure faults from the peer transport. Always caught at the
/// synchronizer boundary and downgraded to "this peer contributed nothing";
/// never fatal to the overall sync.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("peer unreachable: {0}")]
    Network(String),
    #[error("malformed peer response: {0}")]
    MalformedResponse(String),
}
