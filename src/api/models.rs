use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

use crate::blockchain::pow::CancelToken;
use crate::blockchain::{Block, Blockchain, DIFFICULTY_PREFIX};
use crate::peers::PeerSet;
use crate::transaction::Transaction;

/// Lifecycle-scoped node context shared across handlers: the one live
/// chain, the peer registry and the node's reward identity. Multiple
/// instances can coexist in one process, so nothing here is global.
pub struct NodeState {
    pub blockchain: Mutex<Blockchain>,
    pub peers: Mutex<PeerSet>,
    pub node_id: String,
    pub mining_cancel: CancelToken,
}

impl NodeState {
    pub fn new(difficulty_prefix: impl Into<String>) -> Self {
        Self {
            blockchain: Mutex::new(Blockchain::new(difficulty_prefix)),
            peers: Mutex::new(PeerSet::new()),
            node_id: Uuid::new_v4().simple().to_string(),
            mining_cancel: CancelToken::new(),
        }
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self::new(DIFFICULTY_PREFIX)
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub hash_of_previous_block: String,
    pub nonce: u64,
    pub transactions: Vec<Transaction>,
}

/* ---------- Transaction API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub block_index: u64,
}

/* ---------- Peer API Models ---------- */

#[derive(Deserialize)]
pub struct AddNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct AddNodesResponse {
    pub message: &'static str,
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct SyncResponse<'a> {
    pub updated: bool,
    pub length: usize,
    pub chain: &'a [Block],
}
