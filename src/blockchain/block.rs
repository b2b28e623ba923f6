use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// A single block in the chain.
///
/// The serde field names are the wire format shared by every node; both the
/// block hash and the proof-of-work preimage are derived from them, so they
/// must never change shape without a coordinated upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC seconds)
    pub transactions: Vec<Transaction>,
    pub nonce: u64,
    pub hash_of_previous_block: String,
}
