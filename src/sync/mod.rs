pub mod error;
pub mod transport;

pub use error::SyncError;
pub use transport::http_fetch;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, Blockchain, validator};
use crate::peers::PeerSet;

/// A peer's answer to a full-chain query: its reported length plus the
/// chain itself. Matches the `/blockchain` response wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteChain {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Scan every peer for a chain longer than `local_len`, applying the
/// longest-valid-chain rule: a candidate wins iff its reported length
/// strictly exceeds the running best AND the whole chain validates.
///
/// Transport failures are logged and skipped; an invalid-but-longer chain
/// is rejected without affecting how later peers are judged. Returns the
/// best candidate found, if any beat the local chain.
pub fn scan_peers<F>(
    local_len: usize,
    peers: &PeerSet,
    fetch: F,
    difficulty_prefix: &str,
) -> Option<Vec<Block>>
where
    F: Fn(&str) -> Result<RemoteChain, SyncError>,
{
    let mut best_len = local_len;
    let mut best: Option<Vec<Block>> = None;

    for peer in peers.iter() {
        let remote = match fetch(peer) {
            Ok(remote) => remote,
            Err(err) => {
                warn!("SYNC - peer {peer} skipped: {err}");
                continue;
            }
        };

        if remote.length != remote.chain.len() {
            warn!(
                "SYNC - peer {peer} skipped: reported length {} but sent {} blocks",
                remote.length,
                remote.chain.len()
            );
            continue;
        }

        if remote.length <= best_len {
            debug!(
                "SYNC - peer {peer} offers length {} (best so far {best_len}), ignoring",
                remote.length
            );
            continue;
        }

        if !validator::valid_chain(&remote.chain, difficulty_prefix) {
            warn!(
                "SYNC - peer {peer} sent an invalid chain of length {}, rejecting",
                remote.length
            );
            continue;
        }

        debug!("SYNC - peer {peer} leads with valid length {}", remote.length);
        best_len = remote.length;
        best = Some(remote.chain);
    }

    best
}

/// Full synchronization: scan the peers and atomically swap in the longest
/// valid chain found, if it beats the local one. Returns whether the local
/// chain was replaced.
pub fn synchronize<F>(blockchain: &mut Blockchain, peers: &PeerSet, fetch: F) -> bool
where
    F: Fn(&str) -> Result<RemoteChain, SyncError>,
{
    match scan_peers(
        blockchain.len(),
        peers,
        fetch,
        blockchain.difficulty_prefix(),
    ) {
        Some(candidate) => blockchain.adopt_if_longer(candidate),
        None => false,
    }
}
